//! # Logging Infrastructure
//!
//! File-based structured logging for the clinic console.
//!
//! ## Features
//!
//! - **File-based logging**: Structured logs to `logs/clinic-console.log` (daily rotation)
//! - **Optional stderr mirror**: Human-readable output while developing
//! - **Panic hook**: Panics are logged with location and message before the default handler runs
//!
//! The interactive shell owns stdout, so nothing is logged there.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `clinic_console=debug,info`)
//! - `CLINIC_LOG_DIR`: Log directory (default: `logs`)
//! - `CLINIC_LOG_STDERR`: Mirror logs to stderr (1=on, 0=off)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::{init as init_logger, LogGuard};

/// Initialize the logging system.
///
/// Call this at application startup and keep the returned guard alive until
/// exit, otherwise buffered log lines are lost.
pub fn init() -> Option<LogGuard> {
    init_logger(&DebugConfig::from_env())
}
