//! Shopping list entry entity - A desired-to-purchase item on a user's list.
//!
//! A list is identified by its owner's uid. Members the owner has added may
//! read the list and contribute entries, but entries always belong to the
//! owner's list.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shopping list entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shopping_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the item to buy
    pub name: String,
    /// How many to buy. Never negative.
    pub quantity: i64,
    /// Free-form note, may be empty
    pub description: String,
    /// Whether the entry has been checked off
    pub completed: bool,
    /// Identity of the list owner (the list key)
    pub owner_uid: String,
    /// Ordering timestamp: list views sort ascending by it
    pub created_at: DateTime,
    /// When the entry was last modified
    pub updated_at: DateTime,
}

/// Shopping entries have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
