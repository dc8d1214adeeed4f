//! Farmers and the farm trees they own.

pub mod repository;
pub mod service;

pub use repository::{FarmerRepository, SeaOrmFarmerRepository};
pub use service::FarmerService;
