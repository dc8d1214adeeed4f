//! Farms: repository abstraction (with dashboard aggregates) and service.

pub mod repository;
pub mod service;

pub use repository::{FarmRepository, SeaOrmFarmRepository};
pub use service::FarmService;
