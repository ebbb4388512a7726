//! Expiry reminder business logic.
//!
//! Reminders track a product and its expiry date independently of stock.
//! Creation accepts any valid calendar date (a just-scanned label may already
//! be expired); editing additionally rejects dates earlier than today, under
//! the same date-only comparison the urgency classification uses. A reminder
//! can be converted into a shopping-list entry; the conversion leaves the
//! reminder in place so it can seed further entries later.

use crate::{
    core::expiry,
    core::live::{ChangeFeed, Collection},
    core::shopping,
    entities::{ExpiryReminder, expiry_reminder, shopping_entry},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all reminders belonging to one owner, in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn reminders_for_owner(
    db: &DatabaseConnection,
    owner_uid: &str,
) -> Result<Vec<expiry_reminder::Model>> {
    ExpiryReminder::find()
        .filter(expiry_reminder::Column::OwnerUid.eq(owner_uid))
        .order_by_asc(expiry_reminder::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific reminder by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_reminder_by_id(
    db: &DatabaseConnection,
    reminder_id: i64,
) -> Result<Option<expiry_reminder::Model>> {
    ExpiryReminder::find_by_id(reminder_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new expiry reminder, performing input validation.
///
/// The product name must be non-empty and the date must be a real calendar
/// date in strict `YYYY-MM-DD` form. Past dates are accepted here: a label
/// scanned out of the fridge may legitimately already be expired.
///
/// # Errors
/// Returns an error if validation fails or the database insert fails.
pub async fn create_reminder(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    product_name: &str,
    expiry_date: &str,
) -> Result<expiry_reminder::Model> {
    if product_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Product name cannot be empty".to_string(),
        });
    }
    expiry::parse_strict_date(expiry_date)?;

    let now = chrono::Utc::now().naive_utc();
    let reminder = expiry_reminder::ActiveModel {
        product_name: Set(product_name.trim().to_string()),
        expiry_date: Set(expiry_date.trim().to_string()),
        owner_uid: Set(owner_uid.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = reminder.insert(db).await?;
    info!(reminder_id = result.id, owner = owner_uid, "expiry reminder created");
    feed.notify(Collection::Reminders, owner_uid);
    Ok(result)
}

/// Updates a reminder's product name and expiry date from the edit form.
///
/// Besides the strict date-shape check, the edited date must not lie before
/// `today`. The comparison is date-only: time of day plays no part.
///
/// # Errors
/// Returns [`Error::PastDate`] for a date earlier than today, a validation
/// error for a malformed name or date, [`Error::ReminderNotFound`] when the
/// record is gone, or a database error.
pub async fn update_reminder(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    reminder_id: i64,
    product_name: &str,
    expiry_date: &str,
    today: NaiveDate,
) -> Result<expiry_reminder::Model> {
    if product_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Product name cannot be empty".to_string(),
        });
    }
    let date = expiry::parse_strict_date(expiry_date)?;
    if date < today {
        return Err(Error::PastDate {
            input: expiry_date.to_string(),
        });
    }

    let reminder = get_reminder_by_id(db, reminder_id)
        .await?
        .ok_or_else(|| Error::ReminderNotFound {
            id: reminder_id.to_string(),
        })?;
    let owner_uid = reminder.owner_uid.clone();

    let mut reminder: expiry_reminder::ActiveModel = reminder.into();
    reminder.product_name = Set(product_name.trim().to_string());
    reminder.expiry_date = Set(expiry_date.trim().to_string());
    reminder.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = reminder.update(db).await?;
    feed.notify(Collection::Reminders, &owner_uid);
    Ok(updated)
}

/// Deletes a reminder after checking the caller owns it.
///
/// A record that is already gone counts as removed.
///
/// # Errors
/// Returns [`Error::NotAuthorized`] when the caller does not own the
/// reminder, or an error if the database delete fails.
pub async fn delete_reminder(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    caller_uid: &str,
    reminder_id: i64,
) -> Result<()> {
    let Some(reminder) = get_reminder_by_id(db, reminder_id).await? else {
        return Ok(());
    };

    if reminder.owner_uid != caller_uid {
        return Err(Error::NotAuthorized {
            message: format!("reminder {reminder_id} belongs to another user"),
        });
    }

    ExpiryReminder::delete_by_id(reminder_id).exec(db).await?;
    info!(reminder_id, owner = caller_uid, "expiry reminder removed");
    feed.notify(Collection::Reminders, caller_uid);
    Ok(())
}

/// Converts a reminder into a shopping-list entry.
///
/// The entry is created on the reminder owner's list with the product name
/// and the given quantity. The reminder itself is untouched - it remains in
/// the list and may be converted again later.
///
/// # Errors
/// Returns [`Error::ReminderNotFound`] when the reminder is gone, or any
/// error from creating the shopping entry.
pub async fn add_to_shopping_list(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    reminder_id: i64,
    quantity: i64,
) -> Result<shopping_entry::Model> {
    let reminder = get_reminder_by_id(db, reminder_id)
        .await?
        .ok_or_else(|| Error::ReminderNotFound {
            id: reminder_id.to_string(),
        })?;

    let description = format!("Expires {}", reminder.expiry_date);
    shopping::create_entry(
        db,
        feed,
        &reminder.owner_uid,
        &reminder.product_name,
        quantity,
        &description,
    )
    .await
}
