//! Presentation layer for debate-arena
//!
//! This crate contains CLI definitions, output formatters, and the
//! console debate presenter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ConsolePresenter, QuietPresenter};
