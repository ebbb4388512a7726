//! Stock update decision flow.
//!
//! A stock update starts from a raw text input and ends in one of three
//! places: rejected as invalid, applied as a single-field update, or
//! redirected into a confirmation-gated removal. Zero stock is defined as
//! "item no longer tracked", so a zero never reaches storage - on
//! confirmation the record is deleted outright, and on decline nothing is
//! written and the prior stock value stands.

use crate::{
    core::inventory,
    core::live::{ChangeFeed, Collection},
    entities::inventory_item,
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Outcome of evaluating a proposed stock update.
#[derive(Debug, Clone, PartialEq)]
pub enum StockDecision {
    /// Persist the new stock level (a single-field update)
    Apply {
        /// The parsed stock level, always positive
        new_stock: f64,
    },
    /// The input was zero: ask the user to confirm removing the item.
    /// No mutation happens until the caller confirms.
    ConfirmRemoval {
        /// Identity of the item to remove on confirmation
        item_id: i64,
        /// Description to show in the confirmation prompt
        description: String,
        /// Stock level before the edit, for restoring the display if the
        /// user declines
        prior_stock: f64,
    },
}

/// Evaluates a raw stock input against an item.
///
/// The input must parse as a finite, non-negative number; anything else is
/// rejected and nothing is mutated. A parsed zero does not update the store -
/// it becomes a [`StockDecision::ConfirmRemoval`] the caller must get the
/// user to confirm before calling [`crate::core::inventory::delete_item`].
/// A positive value becomes [`StockDecision::Apply`].
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for non-numeric, non-finite, or
/// negative input.
pub fn propose_stock_update(
    item: &inventory_item::Model,
    raw_input: &str,
) -> Result<StockDecision> {
    let parsed: f64 = raw_input
        .trim()
        .parse()
        .map_err(|_| Error::InvalidQuantity {
            input: raw_input.to_string(),
        })?;

    if !parsed.is_finite() || parsed < 0.0 {
        return Err(Error::InvalidQuantity {
            input: raw_input.to_string(),
        });
    }

    if parsed == 0.0 {
        return Ok(StockDecision::ConfirmRemoval {
            item_id: item.id,
            description: item.description.clone(),
            prior_stock: item.current_stock,
        });
    }

    Ok(StockDecision::Apply { new_stock: parsed })
}

/// Persists a positive stock level for an item.
///
/// Writes exactly the `current_stock` column: prices, expiry metadata,
/// priority, and timestamps written by other flows are untouched.
///
/// # Errors
/// Returns [`Error::InvalidQuantity`] for a non-positive or non-finite value
/// (zero must go through the removal flow), [`Error::ItemNotFound`] when the
/// item is gone, or a database error.
pub async fn apply_stock_update(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    item_id: i64,
    new_stock: f64,
) -> Result<inventory_item::Model> {
    if !new_stock.is_finite() || new_stock <= 0.0 {
        return Err(Error::InvalidQuantity {
            input: new_stock.to_string(),
        });
    }

    let item = inventory::get_item_by_id(db, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;
    let owner_uid = item.owner_uid.clone();

    let mut item: inventory_item::ActiveModel = item.into();
    item.current_stock = Set(new_stock);

    let updated = item.update(db).await?;
    info!(item_id, new_stock, "stock level updated");
    feed.notify(Collection::Inventory, &owner_uid);
    Ok(updated)
}

/// Carries out a confirmed removal decision.
///
/// Thin wrapper over [`inventory::delete_item`] so the decision flow reads
/// end-to-end in one module: propose, confirm with the user, then remove.
///
/// # Errors
/// Same failure modes as [`inventory::delete_item`].
pub async fn confirm_removal(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    caller_uid: &str,
    item_id: i64,
) -> Result<()> {
    inventory::delete_item(db, feed, caller_uid, item_id).await
}
