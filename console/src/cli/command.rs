//! # Console Commands
//!
//! One shell line becomes one [`Command`]. The line is split into words
//! first (quotes group words, so `create patient "last_name=Шевченко Т."`
//! keeps the value together), then handed to `clap` without a binary name.

use crate::app::{Entity, Page};
use crate::core::error::{AppError, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use shared::AppointmentStatus;

#[derive(Parser, Debug, PartialEq)]
#[command(
    name = "clinic",
    no_binary_name = true,
    disable_version_flag = true,
    disable_help_flag = true,
    subcommand_required = true
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log in and open the dashboard
    Login { username: String, password: String },

    /// End the session and forget the stored token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Open a page: dashboard, patients, appointments, medical-records, users, departments, rbac
    #[command(alias = "go")]
    Page { page: Page },

    /// Fetch the current page again
    Reload,

    /// Sort the current page by a column key; repeat to flip the direction
    Sort { column: String },

    /// Filter the current page. Appointments take date=YYYY-MM-DD status=<status> or clear
    Filter {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        terms: Vec<String>,
    },

    /// Show one record
    View { entity: Entity, id: i64 },

    /// Create a record from key=value fields
    Create {
        entity: Entity,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },

    /// Update a record from key=value fields
    Update {
        entity: Entity,
        id: i64,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },

    /// Delete a record; asks for confirmation first
    Delete { entity: Entity, id: i64 },

    /// Set an appointment's status
    Status { id: i64, status: AppointmentStatus },

    /// Mark an appointment completed
    Complete { id: i64 },

    /// Cancel an appointment
    Cancel { id: i64 },

    /// Activate a user account
    Activate { id: i64 },

    /// Deactivate a user account
    Deactivate { id: i64 },

    /// Give a user a role
    AssignRole { user_id: i64, role_id: i64 },

    /// Take a role away from a user
    RemoveRole { user_id: i64, role_id: i64 },

    /// Grant a permission to a role
    Grant { role_id: i64, permission_id: i64 },

    /// Revoke a permission from a role
    Revoke { role_id: i64, permission_id: i64 },

    /// List users holding the doctor role
    Doctors,

    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Lines that should not land in the shell history
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Command::Login { .. })
    }
}

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Blank line
    Empty,
    Command(Command),
    /// `help` output to print as-is
    Help(String),
}

/// Split a line into words.
///
/// Whitespace separates words; single and double quotes group them, and a
/// backslash outside single quotes escapes the next character.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('\''), _) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_word = true;
                }
                None => {
                    return Err(AppError::InvalidInput(
                        "line ends with a dangling backslash".to_string(),
                    ))
                }
            },
            (Some(_), _) => current.push(c),
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(AppError::InvalidInput(format!("unclosed {} quote", q)));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse words that were already split
pub fn parse_words(words: &[String]) -> Result<Parsed> {
    if words.is_empty() {
        return Ok(Parsed::Empty);
    }
    match CommandLine::try_parse_from(words) {
        Ok(line) => Ok(Parsed::Command(line.command)),
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            Ok(Parsed::Help(e.render().to_string()))
        }
        Err(e) => Err(AppError::InvalidInput(e.render().to_string().trim().to_string())),
    }
}

pub fn parse_line(line: &str) -> Result<Parsed> {
    parse_words(&split_command_line(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse_line(line).unwrap() {
            Parsed::Command(c) => c,
            other => panic!("expected a command, got {:?}", other),
        }
    }

    #[test]
    fn test_split_plain_and_quoted() {
        assert_eq!(
            split_command_line(r#"create patient "last_name=Шевченко Т." phone='+380 50'"#).unwrap(),
            vec!["create", "patient", "last_name=Шевченко Т.", "phone=+380 50"]
        );
        assert_eq!(split_command_line("  sort   id ").unwrap(), vec!["sort", "id"]);
        assert_eq!(split_command_line(r#"filter """#).unwrap(), vec!["filter", ""]);
        assert_eq!(split_command_line(r"a\ b").unwrap(), vec!["a b"]);
    }

    #[test]
    fn test_split_rejects_unclosed_quote() {
        assert!(matches!(
            split_command_line(r#"filter "abc"#),
            Err(AppError::InvalidInput(_))
        ));
        assert!(split_command_line("x \\").is_err());
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert_eq!(parse_line("   ").unwrap(), Parsed::Empty);
    }

    #[test]
    fn test_page_and_alias() {
        assert_eq!(command("page patients"), Command::Page { page: Page::Patients });
        assert_eq!(
            command("go medical-records"),
            Command::Page {
                page: Page::MedicalRecords
            }
        );
        assert!(parse_line("page wards").is_err());
    }

    #[test]
    fn test_entity_commands() {
        assert_eq!(
            command("update appointment 7 reason=Огляд duration_minutes=45"),
            Command::Update {
                entity: Entity::Appointment,
                id: 7,
                fields: vec!["reason=Огляд".to_string(), "duration_minutes=45".to_string()],
            }
        );
        assert_eq!(
            command("delete patients 3"),
            Command::Delete {
                entity: Entity::Patient,
                id: 3
            }
        );
        assert!(parse_line("view patient abc").is_err());
    }

    #[test]
    fn test_status_uses_wire_vocabulary() {
        assert_eq!(
            command("status 4 in_progress"),
            Command::Status {
                id: 4,
                status: AppointmentStatus::InProgress
            }
        );
        assert!(parse_line("status 4 postponed").is_err());
    }

    #[test]
    fn test_filter_keeps_hyphenated_terms() {
        assert_eq!(
            command("filter -380 clear"),
            Command::Filter {
                terms: vec!["-380".to_string(), "clear".to_string()]
            }
        );
        assert_eq!(command("filter"), Command::Filter { terms: vec![] });
    }

    #[test]
    fn test_kebab_case_and_quit_alias() {
        assert_eq!(
            command("assign-role 2 5"),
            Command::AssignRole {
                user_id: 2,
                role_id: 5
            }
        );
        assert_eq!(command("exit"), Command::Quit);
        assert!(command("login admin secret").is_sensitive());
        assert!(!command("whoami").is_sensitive());
    }

    #[test]
    fn test_help_and_unknown() {
        assert!(matches!(parse_line("help").unwrap(), Parsed::Help(_)));
        assert!(matches!(parse_line("teleport"), Err(AppError::InvalidInput(_))));
    }
}
