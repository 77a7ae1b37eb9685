//! # Interactive Shell
//!
//! `rustyline` prompt loop. Each line is parsed, executed against the
//! [`App`], and followed by a drain of service events so a 401 during the
//! command lands the user on the login view before the next prompt.

use super::command::{parse_line, parse_words, Command, Parsed};
use crate::app::{App, Notice};
use crate::core::error::{AppError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::Path;

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one parsed command
pub async fn execute(app: &App, command: Command) -> Flow {
    if !command.is_sensitive() {
        tracing::debug!(?command, "Executing command");
    }
    match command {
        Command::Login { username, password } => {
            app.login(&username, &password).await;
        }
        Command::Logout => app.logout(),
        Command::Whoami => app.whoami(),
        Command::Page { page } => {
            app.navigate(page).await;
        }
        Command::Reload => {
            app.reload().await;
        }
        Command::Sort { column } => app.sort(&column),
        Command::Filter { terms } => app.filter(&terms),
        Command::View { entity, id } => app.view_entity(entity, id).await,
        Command::Create { entity, fields } => app.create(entity, &fields).await,
        Command::Update { entity, id, fields } => app.update(entity, id, &fields).await,
        Command::Delete { entity, id } => app.delete(entity, id).await,
        Command::Status { id, status } => app.set_appointment_status(id, status).await,
        Command::Complete { id } => app.complete_appointment(id).await,
        Command::Cancel { id } => app.cancel_appointment(id).await,
        Command::Activate { id } => app.set_user_active(id, true).await,
        Command::Deactivate { id } => app.set_user_active(id, false).await,
        Command::AssignRole { user_id, role_id } => app.assign_role(user_id, role_id).await,
        Command::RemoveRole { user_id, role_id } => app.remove_role(user_id, role_id).await,
        Command::Grant {
            role_id,
            permission_id,
        } => app.grant_permission(role_id, permission_id).await,
        Command::Revoke {
            role_id,
            permission_id,
        } => app.revoke_permission(role_id, permission_id).await,
        Command::Doctors => app.list_doctors().await,
        Command::Quit => return Flow::Quit,
    }
    app.process_events();
    Flow::Continue
}

async fn run_parsed(app: &App, parsed: Result<Parsed>) -> Flow {
    match parsed {
        Ok(Parsed::Empty) => Flow::Continue,
        Ok(Parsed::Help(text)) => {
            app.view().show_text(text.trim_end());
            Flow::Continue
        }
        Ok(Parsed::Command(command)) => execute(app, command).await,
        Err(e) => {
            app.view().notify(Notice::Error(e.to_string()));
            Flow::Continue
        }
    }
}

/// Parse and run one shell line
pub async fn run_line(app: &App, line: &str) -> Flow {
    run_parsed(app, parse_line(line)).await
}

/// Run a command given as process arguments
pub async fn run_args(app: &App, args: &[String]) -> Flow {
    run_parsed(app, parse_words(args)).await
}

pub fn prompt(app: &App) -> String {
    if !app.is_authenticated() {
        return "clinic (logged out)> ".to_string();
    }
    match app.current_page() {
        Some(page) => format!("clinic:{}> ", page.id()),
        None => "clinic> ".to_string(),
    }
}

/// Read-eval loop until `quit`, Ctrl-D or Ctrl-C.
///
/// The prompt blocks the runtime thread; nothing else is scheduled on it
/// while the user types.
pub async fn run_shell(app: &App, history: Option<&Path>) -> Result<()> {
    let mut editor = DefaultEditor::new().map_err(|e| AppError::Terminal(e.to_string()))?;

    if let Some(path) = history {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "No shell history loaded");
        }
    }

    tracing::info!("Shell started");
    loop {
        let line = match editor.readline(&prompt(app)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read line");
                return Err(AppError::Terminal(e.to_string()));
            }
        };

        let parsed = parse_line(&line);
        let sensitive = matches!(&parsed, Ok(Parsed::Command(c)) if c.is_sensitive());
        if !sensitive && !line.trim().is_empty() {
            if let Err(e) = editor.add_history_entry(line.as_str()) {
                tracing::debug!(error = %e, "History entry dropped");
            }
        }

        if run_parsed(app, parsed).await == Flow::Quit {
            break;
        }
    }

    if let Some(path) = history {
        save_history(&mut editor, path);
    }
    tracing::info!("Shell closed");
    Ok(())
}

fn save_history(editor: &mut DefaultEditor, path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::warn!(path = %parent.display(), error = %e, "Cannot create history directory");
            return;
        }
    }
    if let Err(e) = editor.save_history(path) {
        tracing::warn!(path = %path.display(), error = %e, "Failed to save shell history");
    }
}
