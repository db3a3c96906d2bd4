//! Live console presenter for a running debate.

use crate::output::console::ConsoleFormatter;
use arena_application::DebatePresenter;
use arena_domain::{DebatePhase, Role};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Streams turns to the terminal with colored speaker labels and a
/// spinner while a search is in flight.
pub struct ConsolePresenter {
    search_spinner: Mutex<Option<ProgressBar>>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            search_spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Ok(mut guard) = self.search_spinner.lock()
            && let Some(spinner) = guard.take()
        {
            spinner.finish_and_clear();
        }
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebatePresenter for ConsolePresenter {
    fn on_turn_start(&self, role: Role, model: &str) {
        self.clear_spinner();
        print!("{}", ConsoleFormatter::turn_header(role, model));
        let _ = std::io::stdout().flush();
    }

    fn on_turn_chunk(&self, _role: Role, chunk: &str) {
        print!("{}", chunk);
        let _ = std::io::stdout().flush();
    }

    fn on_turn_complete(&self, _role: Role) {
        println!();
    }

    fn on_search_query(&self, role: Role, query: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message(format!(
            "{} searching: {}",
            ConsoleFormatter::role_label(role),
            query.dimmed()
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.search_spinner.lock() {
            *guard = Some(spinner);
        }
    }

    fn on_search_result(&self, _role: Role, found: bool) {
        self.clear_spinner();
        if found {
            println!("{}", "  evidence found".dimmed());
        } else {
            println!("{}", "  no evidence, arguing from reasoning".dimmed());
        }
    }

    fn on_phase_change(&self, phase: DebatePhase) {
        self.clear_spinner();
        if phase == DebatePhase::AwaitingVerdict {
            println!("{}", "\nThe debate has ended. Calling the judge...".bold());
        }
    }
}

/// Plain presenter for quiet mode: headers only, no streaming text.
pub struct QuietPresenter;

impl DebatePresenter for QuietPresenter {
    fn on_turn_complete(&self, role: Role) {
        println!("{} finished a turn", role.label());
    }
}
