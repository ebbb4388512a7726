//! User profile directory operations.
//!
//! Identity comes from the external authentication collaborator; this module
//! only maintains the searchable mirror of profile fields (name, email,
//! image) the rest of the application needs.

use crate::{
    entities::{UserProfile, user_profile},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Creates or refreshes the directory record for an authenticated user.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for an empty name or email, or a database
/// error.
pub async fn upsert_profile(
    db: &DatabaseConnection,
    uid: &str,
    name: &str,
    email: &str,
    profile_image: Option<String>,
) -> Result<user_profile::Model> {
    if name.trim().is_empty() || email.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Name and email are required".to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    if let Some(existing) = find_by_uid(db, uid).await? {
        let mut record: user_profile::ActiveModel = existing.into();
        record.name = Set(name.trim().to_string());
        record.email = Set(email.trim().to_string());
        record.profile_image = Set(profile_image);
        record.updated_at = Set(now);
        return record.update(db).await.map_err(Into::into);
    }

    let record = user_profile::ActiveModel {
        uid: Set(uid.to_string()),
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        profile_image: Set(profile_image),
        created_at: Set(now),
        updated_at: Set(now),
    };
    record.insert(db).await.map_err(Into::into)
}

/// Looks a user up by uid.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_by_uid(
    db: &DatabaseConnection,
    uid: &str,
) -> Result<Option<user_profile::Model>> {
    UserProfile::find_by_id(uid).one(db).await.map_err(Into::into)
}

/// Looks a user up by exact email.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user_profile::Model>> {
    UserProfile::find()
        .filter(user_profile::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Updates the editable profile fields (display name and image).
///
/// # Errors
/// Returns [`Error::InvalidInput`] for an empty name, [`Error::UserNotFound`]
/// when the record is gone, or a database error.
pub async fn update_profile(
    db: &DatabaseConnection,
    uid: &str,
    name: &str,
    profile_image: Option<String>,
) -> Result<user_profile::Model> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Name cannot be empty".to_string(),
        });
    }

    let record = find_by_uid(db, uid)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            email: uid.to_string(),
        })?;

    let mut record: user_profile::ActiveModel = record.into();
    record.name = Set(name.trim().to_string());
    record.profile_image = Set(profile_image);
    record.updated_at = Set(chrono::Utc::now().naive_utc());
    record.update(db).await.map_err(Into::into)
}

/// Deletes a user's directory record (account removal).
///
/// A record that is already gone counts as removed.
///
/// # Errors
/// Returns an error if the database delete fails.
pub async fn delete_profile(db: &DatabaseConnection, uid: &str) -> Result<()> {
    if find_by_uid(db, uid).await?.is_none() {
        return Ok(());
    }
    UserProfile::delete_by_id(uid).exec(db).await?;
    info!(uid, "user profile removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_creates_then_refreshes() -> Result<()> {
        let (db, _feed) = setup_test_env().await?;

        let created = upsert_profile(&db, "u1", "Alex", "alex@example.com", None).await?;
        assert_eq!(created.name, "Alex");

        let refreshed =
            upsert_profile(&db, "u1", "Alexandra", "alex@example.com", None).await?;
        assert_eq!(refreshed.uid, "u1");
        assert_eq!(refreshed.name, "Alexandra");

        // Still a single record
        assert!(find_by_email(&db, "alex@example.com").await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_validation() -> Result<()> {
        let (db, _feed) = setup_test_env().await?;

        let result = upsert_profile(&db, "u1", "", "alex@example.com", None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { message: _ }));

        let result = upsert_profile(&db, "u1", "Alex", "  ", None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile() -> Result<()> {
        let (db, _feed) = setup_test_env().await?;
        create_test_profile(&db, "u1", "Alex", "alex@example.com").await?;

        let updated =
            update_profile(&db, "u1", "Al", Some("https://img.example/1.jpg".to_string())).await?;
        assert_eq!(updated.name, "Al");
        assert_eq!(
            updated.profile_image.as_deref(),
            Some("https://img.example/1.jpg")
        );

        let result = update_profile(&db, "missing", "Al", None).await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { email: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_profile_is_idempotent() -> Result<()> {
        let (db, _feed) = setup_test_env().await?;
        create_test_profile(&db, "u1", "Alex", "alex@example.com").await?;

        delete_profile(&db, "u1").await?;
        assert!(find_by_uid(&db, "u1").await?.is_none());
        delete_profile(&db, "u1").await?;

        Ok(())
    }
}
