//! Terminal front end for FWNL: a line-oriented loop over stdin/stdout.

pub mod config;
pub mod repl;

pub use config::{ConfigError, TerminalConfig};
pub use repl::{Repl, greeting};
