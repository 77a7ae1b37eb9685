//! # Command Line Interface
//!
//! - [`command`]: line tokenizer and `clap` command grammar
//! - [`shell`]: command execution and the interactive `rustyline` loop

pub mod command;
pub mod shell;

pub use command::{parse_line, split_command_line, Command, Parsed};
pub use shell::{execute, run_args, run_line, run_shell, Flow};
