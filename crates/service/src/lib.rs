//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access (repository traits per entity).
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod farmer;
pub mod farm;
pub mod harvest;
pub mod dashboard;
#[cfg(test)]
pub mod test_support;

pub use errors::ServiceError;
pub use pagination::{PaginatedResult, PaginationParams};
