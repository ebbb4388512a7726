//! Member entity - A directed "owner added member" relationship between two
//! user identities.
//!
//! The member's display fields are denormalized from the user directory at
//! add time. Pairs are deduplicated on (`owner_uid`, `member_uid`) and only
//! the owner may remove a relationship.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member relationship database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the relationship record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity of the user who owns the membership list
    pub owner_uid: String,
    /// Identity of the added member
    pub member_uid: String,
    /// Member's display name at add time
    pub name: String,
    /// Member's email at add time
    pub email: String,
    /// Member's profile image URL, if any
    pub profile_image: Option<String>,
    /// When the relationship was created
    pub created_at: DateTime,
}

/// Member relationships have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
