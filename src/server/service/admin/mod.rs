//! In-memory administrative state.

pub mod code;
