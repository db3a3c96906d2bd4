//! Web search adapters.

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearch;
