//! Transcript export and parsing

pub mod export;
