//! Core logic — types, config parsing, state codec, and the sealed state file.

pub mod codec;
pub mod error;
pub mod parser;
pub mod pathenc;
pub mod state;
pub mod types;
