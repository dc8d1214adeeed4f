//! Shared building blocks for the HTTP binary and its crates.

pub mod types;
pub mod utils;
