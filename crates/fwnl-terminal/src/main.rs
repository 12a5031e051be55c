//! FWNL terminal: chat with the assistant on stdin/stdout.

use std::sync::Arc;

use chrono::{Local, Timelike};
use tracing_subscriber::EnvFilter;

use fwnl_core::{Assistant, RuleEngine};
use fwnl_terminal::{Repl, TerminalConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "fwnl-terminal starting"
    );

    let config = match std::env::args().nth(1) {
        Some(path) => TerminalConfig::from_file(&path)?,
        None => TerminalConfig::default(),
    };

    let assistant = Assistant::new(Arc::new(RuleEngine::new()));
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Repl::new(&assistant, &config).run(Local::now().hour(), stdin.lock(), stdout.lock())?;

    Ok(())
}
