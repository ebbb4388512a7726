//! User profile entity - The user directory behind member search.
//!
//! Identity (`uid`) is assigned by the external authentication collaborator;
//! this table only mirrors the profile fields the application needs to search
//! for and display other users.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    /// Authentication-collaborator-assigned identity
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    /// Display name
    pub name: String,
    /// Email address, used for member search
    pub email: String,
    /// Profile image URL, if any
    pub profile_image: Option<String>,
    /// When the profile was created
    pub created_at: DateTime,
    /// When the profile was last modified
    pub updated_at: DateTime,
}

/// User profiles have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
