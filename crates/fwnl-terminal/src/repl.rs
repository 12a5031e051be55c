//! Read-eval-print loop over any line source and sink.

use std::io::{self, BufRead, Write};

use fwnl_core::{Assistant, Session};

use crate::config::TerminalConfig;

const INDENT: &str = "\t\t";

/// Greeting for the given local hour (0-23).
pub fn greeting(hour: u32) -> String {
    let time = match hour {
        6..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    };
    format!("Good {time}! I'm here to help you in setting up firewalls.")
}

/// One terminal conversation.
pub struct Repl<'a> {
    assistant: &'a Assistant,
    config: &'a TerminalConfig,
    session: Session,
}

impl<'a> Repl<'a> {
    pub fn new(assistant: &'a Assistant, config: &'a TerminalConfig) -> Self {
        Self {
            assistant,
            config,
            session: Session::new(),
        }
    }

    /// Greet, then answer lines from `input` until EOF or `/quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, hour: u32, input: R, mut output: W) -> io::Result<()> {
        self.say(&mut output, &greeting(hour))?;
        let mut lines = input.lines();
        loop {
            write!(output, "{}:{INDENT} ", self.config.user)?;
            output.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("/quit") {
                break;
            }
            for reply in self.assistant.handle(line, &mut self.session) {
                self.say(&mut output, &reply)?;
            }
        }
        writeln!(output)?;
        tracing::debug!("terminal loop finished");
        Ok(())
    }

    fn say<W: Write>(&self, output: &mut W, message: &str) -> io::Result<()> {
        writeln!(output, "{}:{INDENT}{message}", self.config.nickname)
    }
}
