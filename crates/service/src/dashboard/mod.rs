//! Read-only aggregates over farms and harvests.

pub mod domain;
pub mod service;

pub use domain::{AreaDistribution, DashboardData};
pub use service::DashboardService;
