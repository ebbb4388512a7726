//! Shopping list business logic.
//!
//! A list belongs to one owner and is shared read/contribute with the users
//! the owner has added as members. Members may see the list and add entries
//! to it; editing and deleting entries stays with the owner. Entries are
//! ordered by creation time so the list reads in the order it was built.

use crate::{
    core::live::{ChangeFeed, Collection},
    core::member,
    entities::{ShoppingEntry, shopping_entry},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all entries on one owner's list, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn entries_for_owner(
    db: &DatabaseConnection,
    owner_uid: &str,
) -> Result<Vec<shopping_entry::Model>> {
    ShoppingEntry::find()
        .filter(shopping_entry::Column::OwnerUid.eq(owner_uid))
        .order_by_asc(shopping_entry::Column::CreatedAt)
        .order_by_asc(shopping_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an owner's list on behalf of a viewer.
///
/// The owner always sees their own list; anyone else must be one of the
/// owner's members.
///
/// # Errors
/// Returns [`Error::NotAuthorized`] when the viewer is neither the owner nor
/// a member, or an error if a database query fails.
pub async fn entries_for_viewer(
    db: &DatabaseConnection,
    owner_uid: &str,
    viewer_uid: &str,
) -> Result<Vec<shopping_entry::Model>> {
    if viewer_uid != owner_uid && !member::is_member(db, owner_uid, viewer_uid).await? {
        return Err(Error::NotAuthorized {
            message: format!("{viewer_uid} is not a member of this list"),
        });
    }
    entries_for_owner(db, owner_uid).await
}

/// Retrieves a specific entry by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_entry_by_id(
    db: &DatabaseConnection,
    entry_id: i64,
) -> Result<Option<shopping_entry::Model>> {
    ShoppingEntry::find_by_id(entry_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new entry on an owner's list, performing input validation.
///
/// The name must be non-empty and the quantity non-negative.
///
/// # Errors
/// Returns an error if validation fails or the database insert fails.
pub async fn create_entry(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    name: &str,
    quantity: i64,
    description: &str,
) -> Result<shopping_entry::Model> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Item name is required".to_string(),
        });
    }
    if quantity < 0 {
        return Err(Error::InvalidQuantity {
            input: quantity.to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let entry = shopping_entry::ActiveModel {
        name: Set(name.trim().to_string()),
        quantity: Set(quantity),
        description: Set(description.to_string()),
        completed: Set(false),
        owner_uid: Set(owner_uid.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    info!(entry_id = result.id, owner = owner_uid, "shopping entry created");
    feed.notify(Collection::ShoppingList, owner_uid);
    Ok(result)
}

/// Creates an entry on someone else's list, on behalf of one of their
/// members.
///
/// # Errors
/// Returns [`Error::NotAuthorized`] when the contributor is not a member of
/// the owner's list, plus the failure modes of [`create_entry`].
pub async fn add_entry_as_member(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    contributor_uid: &str,
    name: &str,
    quantity: i64,
    description: &str,
) -> Result<shopping_entry::Model> {
    if contributor_uid != owner_uid && !member::is_member(db, owner_uid, contributor_uid).await? {
        return Err(Error::NotAuthorized {
            message: format!("{contributor_uid} is not a member of this list"),
        });
    }
    create_entry(db, feed, owner_uid, name, quantity, description).await
}

/// Updates an entry's name, quantity, and description.
///
/// Only the list owner may edit entries.
///
/// # Errors
/// Returns a validation error for a bad name or quantity,
/// [`Error::EntryNotFound`] when the record is gone, [`Error::NotAuthorized`]
/// for a non-owner caller, or a database error.
pub async fn update_entry(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    caller_uid: &str,
    entry_id: i64,
    name: &str,
    quantity: i64,
    description: &str,
) -> Result<shopping_entry::Model> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Item name is required".to_string(),
        });
    }
    if quantity < 0 {
        return Err(Error::InvalidQuantity {
            input: quantity.to_string(),
        });
    }

    let entry = get_entry_by_id(db, entry_id)
        .await?
        .ok_or_else(|| Error::EntryNotFound {
            id: entry_id.to_string(),
        })?;
    if entry.owner_uid != caller_uid {
        return Err(Error::NotAuthorized {
            message: format!("entry {entry_id} belongs to another list"),
        });
    }
    let owner_uid = entry.owner_uid.clone();

    let mut entry: shopping_entry::ActiveModel = entry.into();
    entry.name = Set(name.trim().to_string());
    entry.quantity = Set(quantity);
    entry.description = Set(description.to_string());
    entry.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = entry.update(db).await?;
    feed.notify(Collection::ShoppingList, &owner_uid);
    Ok(updated)
}

/// Checks an entry off (or back on) the list.
///
/// # Errors
/// Returns [`Error::EntryNotFound`] when the record is gone,
/// [`Error::NotAuthorized`] for a non-owner caller, or a database error.
pub async fn set_completed(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    caller_uid: &str,
    entry_id: i64,
    completed: bool,
) -> Result<shopping_entry::Model> {
    let entry = get_entry_by_id(db, entry_id)
        .await?
        .ok_or_else(|| Error::EntryNotFound {
            id: entry_id.to_string(),
        })?;
    if entry.owner_uid != caller_uid {
        return Err(Error::NotAuthorized {
            message: format!("entry {entry_id} belongs to another list"),
        });
    }
    let owner_uid = entry.owner_uid.clone();

    let mut entry: shopping_entry::ActiveModel = entry.into();
    entry.completed = Set(completed);
    entry.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = entry.update(db).await?;
    feed.notify(Collection::ShoppingList, &owner_uid);
    Ok(updated)
}

/// Deletes an entry after checking the caller owns the list.
///
/// A record that is already gone counts as removed.
///
/// # Errors
/// Returns [`Error::NotAuthorized`] for a non-owner caller, or an error if
/// the database delete fails.
pub async fn delete_entry(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    caller_uid: &str,
    entry_id: i64,
) -> Result<()> {
    let Some(entry) = get_entry_by_id(db, entry_id).await? else {
        return Ok(());
    };

    if entry.owner_uid != caller_uid {
        return Err(Error::NotAuthorized {
            message: format!("entry {entry_id} belongs to another list"),
        });
    }

    ShoppingEntry::delete_by_id(entry_id).exec(db).await?;
    info!(entry_id, owner = caller_uid, "shopping entry removed");
    feed.notify(Collection::ShoppingList, caller_uid);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_entry_validation() -> Result<()> {
        let (db, feed) = setup_test_env().await?;

        let result = create_entry(&db, &feed, "user-1", "", 1, "").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidInput { message: _ }
        ));

        let result = create_entry(&db, &feed, "user-1", "Eggs", -1, "").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { input: _ }
        ));

        // Zero is a valid "just remind me" quantity
        let entry = create_entry(&db, &feed, "user-1", "Eggs", 0, "").await?;
        assert_eq!(entry.quantity, 0);
        assert!(!entry.completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_are_ordered_by_creation() -> Result<()> {
        let (db, feed) = setup_test_env().await?;

        let first = create_entry(&db, &feed, "user-1", "Eggs", 12, "").await?;
        let second = create_entry(&db, &feed, "user-1", "Butter", 1, "").await?;
        create_entry(&db, &feed, "user-2", "Not mine", 1, "").await?;

        let entries = entries_for_owner(&db, "user-1").await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, first.id);
        assert_eq!(entries[1].id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_member_can_view_and_contribute() -> Result<()> {
        let (db, feed) = setup_test_env().await?;
        create_test_profile(&db, "owner", "Owner", "owner@example.com").await?;
        create_test_profile(&db, "friend", "Friend", "friend@example.com").await?;
        add_test_member(&db, &feed, "owner", "friend").await?;

        create_entry(&db, &feed, "owner", "Eggs", 12, "").await?;

        // Member sees the owner's list
        let seen = entries_for_viewer(&db, "owner", "friend").await?;
        assert_eq!(seen.len(), 1);

        // Member contributes; the entry lands on the owner's list
        let entry =
            add_entry_as_member(&db, &feed, "owner", "friend", "Butter", 1, "from friend").await?;
        assert_eq!(entry.owner_uid, "owner");

        let entries = entries_for_owner(&db, "owner").await?;
        assert_eq!(entries.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_stranger_gets_not_authorized() -> Result<()> {
        let (db, feed) = setup_test_env().await?;
        create_entry(&db, &feed, "owner", "Eggs", 12, "").await?;

        let result = entries_for_viewer(&db, "owner", "stranger").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotAuthorized { message: _ }
        ));

        let result = add_entry_as_member(&db, &feed, "owner", "stranger", "Butter", 1, "").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotAuthorized { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_complete_are_owner_only() -> Result<()> {
        let (db, feed) = setup_test_env().await?;
        let entry = create_entry(&db, &feed, "owner", "Eggs", 12, "").await?;

        let result = update_entry(&db, &feed, "friend", entry.id, "Eggs", 6, "").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotAuthorized { message: _ }
        ));

        let updated = update_entry(&db, &feed, "owner", entry.id, "Eggs", 6, "half").await?;
        assert_eq!(updated.quantity, 6);
        assert_eq!(updated.description, "half");

        let completed = set_completed(&db, &feed, "owner", entry.id, true).await?;
        assert!(completed.completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_shopping_snapshots_follow_mutations() -> Result<()> {
        let (db, feed) = setup_test_env().await?;
        let mut snapshots = crate::core::live::watch_shopping_list(&db, &feed, "owner");

        let entry = create_entry(&db, &feed, "owner", "Eggs", 12, "").await?;
        let snapshot = snapshots.next().await?.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, entry.id);

        delete_entry(&db, &feed, "owner", entry.id).await?;
        let snapshot = snapshots.next().await?.unwrap();
        assert!(snapshot.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_entry() -> Result<()> {
        let (db, feed) = setup_test_env().await?;
        let entry = create_entry(&db, &feed, "owner", "Eggs", 12, "").await?;

        let result = delete_entry(&db, &feed, "stranger", entry.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotAuthorized { message: _ }
        ));

        delete_entry(&db, &feed, "owner", entry.id).await?;
        assert!(get_entry_by_id(&db, entry.id).await?.is_none());

        // Deleting again is already resolved
        delete_entry(&db, &feed, "owner", entry.id).await?;

        Ok(())
    }
}
