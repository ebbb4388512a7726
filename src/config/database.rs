//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation via `SeaORM`. Tables
//! are derived straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always follows the Rust
//! structs and there is no hand-written SQL to keep in sync.

use crate::entities::{ExpiryReminder, InventoryItem, Member, ShoppingEntry, UserProfile};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Resolves the database URL: `DATABASE_URL` from the environment, or a
/// local `SQLite` file when unset.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/larder.sqlite".to_string())
}

/// Opens a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates the tables for inventory items, expiry reminders, shopping
/// entries, members, and user profiles from their entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let inventory_table = schema.create_table_from_entity(InventoryItem);
    let reminder_table = schema.create_table_from_entity(ExpiryReminder);
    let shopping_table = schema.create_table_from_entity(ShoppingEntry);
    let member_table = schema.create_table_from_entity(Member);
    let profile_table = schema.create_table_from_entity(UserProfile);

    db.execute(builder.build(&inventory_table)).await?;
    db.execute(builder.build(&reminder_table)).await?;
    db.execute(builder.build(&shopping_table)).await?;
    db.execute(builder.build(&member_table)).await?;
    db.execute(builder.build(&profile_table)).await?;

    Ok(())
}
