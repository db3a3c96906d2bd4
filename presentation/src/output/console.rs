//! Console output formatting for debates.

use arena_domain::Role;
use colored::{ColoredString, Colorize};

/// Formats debate output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Colored display label for a speaker.
    pub fn role_label(role: Role) -> ColoredString {
        match role {
            Role::User => role.label().green().bold(),
            Role::Strategist => role.label().blue().bold(),
            Role::Critic => role.label().red().bold(),
            Role::Judge => role.label().yellow().bold(),
        }
    }

    /// Banner shown at the start of a turn.
    pub fn turn_header(role: Role, model: &str) -> String {
        format!("\n{} {}\n", Self::role_label(role), format!("({})", model).dimmed())
    }

    /// Section header for the verdict.
    pub fn verdict_header() -> String {
        format!("\n{}\n", "=== FINAL VERDICT ===".yellow().bold())
    }

    /// Section header for the summary report.
    pub fn summary_header() -> String {
        format!("\n{}\n", "=== DEBATE SUMMARY ===".cyan().bold())
    }

    /// Banner for one strategist/critic exchange in the round view.
    pub fn round_header(number: usize) -> String {
        format!("\n{}\n", format!("--- Round {} ---", number).cyan().bold())
    }

    /// One-line note that the transcript was exported.
    pub fn export_note(path: &std::path::Path) -> String {
        format!("{} {}", "Transcript saved:".green(), path.display())
    }

    /// Error line for command-level failures.
    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }
}
