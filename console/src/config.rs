//! # Console Configuration
//!
//! Configuration is read from environment variables, then selectively
//! overridden by command-line flags in `main.rs`. Everything is validated
//! before the API client is built so a bad base URL fails fast.
//!
//! | Variable                      | Default                                        |
//! |-------------------------------|------------------------------------------------|
//! | `CLINIC_API_URL`              | `http://127.0.0.1:8000/api`                    |
//! | `CLINIC_TOKEN_FILE`           | `<config dir>/clinic-console/session.json`     |
//! | `CLINIC_REQUEST_TIMEOUT_SECS` | unset (requests never time out)                |
//! | `CLINIC_DOCTOR_ROLE`          | `Лікар`                                        |
//! | `CLINIC_HISTORY_FILE`         | `<data dir>/clinic-console/history.txt`        |

use crate::core::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend base path.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Role name the backend seeds for doctors.
pub const DEFAULT_DOCTOR_ROLE: &str = "Лікар";

const TOKEN_FILE_NAME: &str = "session.json";
const HISTORY_FILE_NAME: &str = "history.txt";
const APP_DIR_NAME: &str = "clinic-console";

/// Console configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Backend base path, every endpoint is appended to it
    pub api_url: String,

    /// File holding the persisted bearer token
    pub token_file: PathBuf,

    /// Per-request timeout. `None` leaves a hung request pending forever.
    pub request_timeout: Option<Duration>,

    /// Role name identifying doctors in `/users`
    pub doctor_role: String,

    /// Shell history. `None` keeps history in memory only.
    pub history_file: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_file: default_token_file(),
            request_timeout: None,
            doctor_role: DEFAULT_DOCTOR_ROLE.to_string(),
            history_file: default_history_file(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_url = env::var("CLINIC_API_URL").unwrap_or(defaults.api_url);

        let token_file = env::var("CLINIC_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_file);

        let request_timeout = match env::var("CLINIC_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|e| {
                AppError::Config(format!(
                    "CLINIC_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?)),
            Err(_) => None,
        };

        let doctor_role = env::var("CLINIC_DOCTOR_ROLE").unwrap_or(defaults.doctor_role);

        let history_file = env::var("CLINIC_HISTORY_FILE")
            .ok()
            .map(PathBuf::from)
            .or(defaults.history_file);

        Ok(Self {
            api_url,
            token_file,
            request_timeout,
            doctor_role,
            history_file,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(AppError::Config("API URL must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(AppError::Config("request timeout must be greater than zero".to_string()));
        }
        if self.doctor_role.trim().is_empty() {
            return Err(AppError::Config("doctor role name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for `format!("{base}{endpoint}")`.
    pub fn normalized_api_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }
}

fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(TOKEN_FILE_NAME)
}

fn default_history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(HISTORY_FILE_NAME))
}
