//! Expiry reminder entity - A product-and-expiry-date pair tracked
//! independently of stock quantity.
//!
//! Reminders come from label scans or manual entry and drive the
//! expiring-soon list and shopping-list suggestions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expiry reminder database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expiry_reminders")]
pub struct Model {
    /// Unique identifier for the reminder
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product the reminder tracks
    pub product_name: String,
    /// Expiry date in strict `YYYY-MM-DD` form
    pub expiry_date: String,
    /// Identity of the owning user
    pub owner_uid: String,
    /// When the reminder was created
    pub created_at: DateTime,
    /// When the reminder was last modified
    pub updated_at: DateTime,
}

/// Expiry reminders have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
