//! Terminal confirmation adapter.
//!
//! Asks on stdout, reads a y/n line from stdin. Blocking reads run on the
//! blocking pool so the session's thread stays free.

use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::ports::ConfirmationPrompt;

/// Interactive yes/no prompt on the controlling terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalConfirmation;

impl TerminalConfirmation {
    pub fn new() -> Self {
        Self
    }

    fn ask(message: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{} [y/N] ", message)?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;

        Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

#[async_trait]
impl ConfirmationPrompt for TerminalConfirmation {
    async fn confirm(&self, message: &str) -> bool {
        let message = message.to_string();

        match tokio::task::spawn_blocking(move || Self::ask(&message)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(err)) => {
                warn!(error = %err, "confirmation prompt failed, treating as declined");
                false
            }
            Err(err) => {
                warn!(error = %err, "confirmation task failed, treating as declined");
                false
            }
        }
    }
}
