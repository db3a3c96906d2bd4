//! Backend conversation primitives

pub mod entities;
pub mod stream;
