//! Inventory business logic - item creation, lookup, metadata updates, and
//! removal.
//!
//! Items are exclusively owned: every list query filters on the owner's uid
//! and removal checks the caller's identity against the record before
//! touching it. Stock-level changes go through [`crate::core::stock`]; this
//! module owns everything else about an item's lifecycle.

use crate::{
    core::live::{ChangeFeed, Collection},
    core::priority::Priority,
    entities::{InventoryItem, inventory_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, warn};

/// Field values for a manually entered inventory item.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// What the item is
    pub description: String,
    /// Starting stock level, must be positive
    pub current_stock: f64,
    /// Price per unit
    pub unit_price: f64,
    /// Total paid
    pub total_price: f64,
    /// Unit the stock is counted in
    pub measurement_unit: String,
    /// Optional priority label
    pub priority: Option<String>,
    /// Optional expiry date
    pub expiry_date: Option<String>,
}

/// One recognized line item from a scanned receipt, as reviewed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLineItem {
    /// Item description as recognized
    pub description: String,
    /// Total price for the line
    pub price: f64,
    /// Quantity purchased
    pub quantity: f64,
}

/// Retrieves all inventory items belonging to one owner, in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn items_for_owner(
    db: &DatabaseConnection,
    owner_uid: &str,
) -> Result<Vec<inventory_item::Model>> {
    InventoryItem::find()
        .filter(inventory_item::Column::OwnerUid.eq(owner_uid))
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific inventory item by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_item_by_id(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new inventory item, performing input validation.
///
/// The description must be non-empty, prices must be non-negative and finite,
/// and the starting stock must be positive - a zero stock level means "not
/// tracked", so there is nothing to create.
///
/// # Errors
/// Returns an error if validation fails or the database insert fails.
pub async fn create_item(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    new: NewItem,
) -> Result<inventory_item::Model> {
    if new.description.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Item description cannot be empty".to_string(),
        });
    }
    if !new.current_stock.is_finite() || new.current_stock <= 0.0 {
        return Err(Error::InvalidQuantity {
            input: new.current_stock.to_string(),
        });
    }
    for amount in [new.unit_price, new.total_price] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount { amount });
        }
    }

    let now = chrono::Utc::now().naive_utc();
    let item = inventory_item::ActiveModel {
        description: Set(new.description.trim().to_string()),
        current_stock: Set(new.current_stock),
        unit_price: Set(new.unit_price),
        total_price: Set(new.total_price),
        measurement_unit: Set(new.measurement_unit),
        priority: Set(new.priority),
        expiry_date: Set(new.expiry_date),
        owner_uid: Set(owner_uid.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = item.insert(db).await?;
    info!(item_id = result.id, owner = owner_uid, "inventory item created");
    feed.notify(Collection::Inventory, owner_uid);
    Ok(result)
}

/// Commits reviewed receipt line items into the owner's inventory.
///
/// Each line becomes one item: the recognized quantity is the starting stock,
/// the line total is the total price, and the unit price is derived from the
/// two. Lines with a blank description, a non-positive quantity, or a
/// negative price are skipped rather than failing the whole commit.
///
/// # Errors
/// Returns an error if a database insert fails.
pub async fn add_scanned_items(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    lines: &[ScannedLineItem],
) -> Result<Vec<inventory_item::Model>> {
    let now = chrono::Utc::now().naive_utc();
    let mut created = Vec::new();

    for line in lines {
        let description = line.description.trim();
        if description.is_empty() || line.quantity <= 0.0 || line.price < 0.0 {
            warn!(?line, "skipping unusable scanned line item");
            continue;
        }

        let item = inventory_item::ActiveModel {
            description: Set(description.to_string()),
            current_stock: Set(line.quantity),
            unit_price: Set(line.price / line.quantity),
            total_price: Set(line.price),
            measurement_unit: Set("unit".to_string()),
            priority: Set(None),
            expiry_date: Set(None),
            owner_uid: Set(owner_uid.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        created.push(item.insert(db).await?);
    }

    info!(
        owner = owner_uid,
        scanned = lines.len(),
        committed = created.len(),
        "scanned items committed to inventory"
    );
    if !created.is_empty() {
        feed.notify(Collection::Inventory, owner_uid);
    }
    Ok(created)
}

/// Sets or clears an item's expiry date.
///
/// A provided date must be in strict `YYYY-MM-DD` form. Only the expiry field
/// and the update timestamp are written.
///
/// # Errors
/// Returns an error if the date is malformed, the item does not exist, or the
/// database update fails.
pub async fn set_expiry_date(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    item_id: i64,
    expiry_date: Option<&str>,
) -> Result<inventory_item::Model> {
    if let Some(raw) = expiry_date {
        crate::core::expiry::parse_strict_date(raw)?;
    }

    let item = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;
    let owner_uid = item.owner_uid.clone();

    let mut item: inventory_item::ActiveModel = item.into();
    item.expiry_date = Set(expiry_date.map(|d| d.trim().to_string()));
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = item.update(db).await?;
    feed.notify(Collection::Inventory, &owner_uid);
    Ok(updated)
}

/// Sets an item's priority label.
///
/// # Errors
/// Returns an error if the item does not exist or the database update fails.
pub async fn set_priority(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    item_id: i64,
    priority: Priority,
) -> Result<inventory_item::Model> {
    let item = get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;
    let owner_uid = item.owner_uid.clone();

    let mut item: inventory_item::ActiveModel = item.into();
    item.priority = Set(Some(priority.as_str().to_string()));
    item.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = item.update(db).await?;
    feed.notify(Collection::Inventory, &owner_uid);
    Ok(updated)
}

/// Removes an item's record entirely. Irreversible - there is no soft delete.
///
/// The caller's identity must match the item's owner. A record that is
/// already gone counts as removed: the delete succeeds without touching
/// anything.
///
/// # Errors
/// Returns [`Error::NotAuthorized`] when the caller does not own the item, or
/// an error if the database delete fails.
pub async fn delete_item(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    caller_uid: &str,
    item_id: i64,
) -> Result<()> {
    let Some(item) = get_item_by_id(db, item_id).await? else {
        debug!(item_id, "delete requested for item that is already gone");
        return Ok(());
    };

    if item.owner_uid != caller_uid {
        return Err(Error::NotAuthorized {
            message: format!("item {item_id} belongs to another user"),
        });
    }

    InventoryItem::delete_by_id(item_id).exec(db).await?;
    info!(item_id, owner = caller_uid, "inventory item removed");
    feed.notify(Collection::Inventory, caller_uid);
    Ok(())
}
