//! Harvest records: repository abstraction and service.

pub mod repository;
pub mod service;

pub use repository::{HarvestRepository, SeaOrmHarvestRepository};
pub use service::HarvestService;
