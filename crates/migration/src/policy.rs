//! Referential actions applied when a parent row is removed or re-keyed.
//!
//! Ownership of farms by farmers (and of harvests by farms) is soft: removing
//! the parent detaches the children instead of deleting them. The table
//! definitions and the SeaORM relations both read these constants.
use sea_orm_migration::prelude::ForeignKeyAction;

/// `farm.farmer_id` when its farmer is deleted.
pub const FARM_ON_FARMER_DELETE: ForeignKeyAction = ForeignKeyAction::SetNull;
/// `harvest.farm_id` when its farm is deleted.
pub const HARVEST_ON_FARM_DELETE: ForeignKeyAction = ForeignKeyAction::SetNull;
/// Both child tables follow primary key changes of their parent.
pub const ON_PARENT_UPDATE: ForeignKeyAction = ForeignKeyAction::Cascade;
