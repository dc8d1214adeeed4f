//! Data model: SeaORM entities for the `farmer`, `farm` and `harvest` tables,
//! the aggregates exchanged with callers, and their validation rules.

pub mod errors;
pub mod db;
pub mod farmer;
pub mod farm;
pub mod harvest;

pub use farm::{Farm, StateCount};
pub use farmer::Farmer;
pub use harvest::{CultureCount, Harvest};

#[cfg(test)]
mod tests;
