//! Inventory item entity - Represents one tracked physical good owned by a user.
//!
//! Items enter the inventory either from a reviewed receipt scan or from manual
//! entry. Stock levels are mutated through the stock-update flow; a stock level
//! of zero is never persisted - it turns into a confirmed removal instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What the item is (e.g., "Fresh Milk 1L")
    pub description: String,
    /// Quantity currently on hand, in `measurement_unit` units. Always > 0
    /// for a persisted record.
    pub current_stock: f64,
    /// Price per single unit
    pub unit_price: f64,
    /// Total paid at purchase time
    pub total_price: f64,
    /// Unit the stock is counted in ("unit", "kg", "g", ...). Free-form in
    /// storage; normalized where it matters.
    pub measurement_unit: String,
    /// Stored priority label. Nullable: records created before the priority
    /// field existed read back as `Important`.
    pub priority: Option<String>,
    /// Raw expiry date value. Parsed leniently at derivation sites; an
    /// unparseable value degrades to "unknown urgency", never an error.
    pub expiry_date: Option<String>,
    /// Identity of the owning user; every read and mutation is scoped to it
    pub owner_uid: String,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

/// Inventory items have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
