//! Confirmation prompt adapters.

mod static_prompt;
mod terminal_prompt;

pub use static_prompt::StaticConfirmation;
pub use terminal_prompt::TerminalConfirmation;
