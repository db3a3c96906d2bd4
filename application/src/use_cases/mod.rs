//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_debate;
pub mod search_decision;
pub mod summarize;
