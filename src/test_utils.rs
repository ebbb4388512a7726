//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::inventory::{self, NewItem},
    core::live::ChangeFeed,
    core::{member, profile, reminder},
    entities::{inventory_item, member as member_entity, user_profile},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Sets up the standard test environment: an in-memory database plus a
/// fresh change feed. Returns (db, feed).
pub async fn setup_test_env() -> Result<(DatabaseConnection, ChangeFeed)> {
    let db = setup_test_db().await?;
    Ok((db, ChangeFeed::new()))
}

/// Field values for a test inventory item with sensible defaults.
///
/// # Defaults
/// * `unit_price`: 350.0
/// * `total_price`: `unit_price * current_stock`
/// * `measurement_unit`: "unit"
/// * no priority, no expiry date
pub fn new_item(description: &str, current_stock: f64) -> NewItem {
    NewItem {
        description: description.to_string(),
        current_stock,
        unit_price: 350.0,
        total_price: 350.0 * current_stock,
        measurement_unit: "unit".to_string(),
        priority: None,
        expiry_date: None,
    }
}

/// Creates a test inventory item with a stock level of 2.
pub async fn create_test_item(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    description: &str,
) -> Result<inventory_item::Model> {
    inventory::create_item(db, feed, owner_uid, new_item(description, 2.0)).await
}

/// Creates a test inventory item with a specific stock level.
pub async fn create_test_item_with_stock(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    description: &str,
    current_stock: f64,
) -> Result<inventory_item::Model> {
    inventory::create_item(db, feed, owner_uid, new_item(description, current_stock)).await
}

/// Creates a test expiry reminder dated well in the future.
pub async fn create_test_reminder(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    product_name: &str,
) -> Result<crate::entities::expiry_reminder::Model> {
    reminder::create_reminder(db, feed, owner_uid, product_name, "2099-12-31").await
}

/// Creates a test user profile in the directory.
pub async fn create_test_profile(
    db: &DatabaseConnection,
    uid: &str,
    name: &str,
    email: &str,
) -> Result<user_profile::Model> {
    profile::upsert_profile(db, uid, name, email, None).await
}

/// Adds `member_uid` (who must already have a profile) to the owner's
/// member list.
pub async fn add_test_member(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    member_uid: &str,
) -> Result<member_entity::Model> {
    let user = profile::find_by_uid(db, member_uid)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            email: member_uid.to_string(),
        })?;
    member::add_member(db, feed, owner_uid, &user).await
}

/// Builds an in-memory inventory item model for pure derivation tests.
/// Not persisted anywhere.
#[must_use]
pub fn item_with_expiry(id: i64, expiry_date: Option<&str>) -> inventory_item::Model {
    budget_item(id, "Test Item", None, 2.0, 350.0, "unit", expiry_date)
}

/// Builds an in-memory inventory item model with the fields the budget
/// generator cares about. Not persisted anywhere.
#[must_use]
pub fn budget_item(
    id: i64,
    description: &str,
    priority: Option<&str>,
    current_stock: f64,
    unit_price: f64,
    measurement_unit: &str,
    expiry_date: Option<&str>,
) -> inventory_item::Model {
    let now = chrono::Utc::now().naive_utc();
    inventory_item::Model {
        id,
        description: description.to_string(),
        current_stock,
        unit_price,
        total_price: unit_price * current_stock,
        measurement_unit: measurement_unit.to_string(),
        priority: priority.map(ToString::to_string),
        expiry_date: expiry_date.map(ToString::to_string),
        owner_uid: "test-user".to_string(),
        created_at: now,
        updated_at: now,
    }
}
