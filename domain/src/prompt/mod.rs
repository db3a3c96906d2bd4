//! Deterministic prompt construction for the debate personas

pub mod history;
pub mod persona;
