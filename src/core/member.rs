//! Member business logic - searching the user directory and managing the
//! owner's member list.
//!
//! Membership is a directed relationship: "owner added member". Pairs are
//! deduplicated, self-addition is rejected, and only the owner may remove a
//! relationship.

use crate::{
    core::live::{ChangeFeed, Collection},
    core::profile,
    entities::{Member, member, user_profile},
    errors::{Error, Result},
};
use regex::Regex;
use sea_orm::{QueryOrder, Set, prelude::*};
use std::sync::LazyLock;
use tracing::info;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hard-coded email pattern"));

/// Outcome of looking up a user by email on the add-member screen.
#[derive(Debug, Clone, PartialEq)]
pub enum UserSearch {
    /// Another user matched and can be added
    Found(user_profile::Model),
    /// The searched email is the caller's own
    OwnEmail,
}

/// Searches the user directory by exact email.
///
/// The email must have a plausible shape. Finding yourself is reported as
/// [`UserSearch::OwnEmail`] rather than a match, since you cannot add
/// yourself as a member.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for a malformed email,
/// [`Error::UserNotFound`] when nobody matches, or a database error.
pub async fn search_user_by_email(
    db: &DatabaseConnection,
    email: &str,
    current_uid: &str,
) -> Result<UserSearch> {
    let email = email.trim();
    if email.is_empty() || !EMAIL_RE.is_match(email) {
        return Err(Error::InvalidInput {
            message: "Please enter a valid email address".to_string(),
        });
    }

    let Some(user) = profile::find_by_email(db, email).await? else {
        return Err(Error::UserNotFound {
            email: email.to_string(),
        });
    };

    if user.uid == current_uid {
        return Ok(UserSearch::OwnEmail);
    }
    Ok(UserSearch::Found(user))
}

/// Retrieves all members the owner has added, in insertion order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn members_for_owner(
    db: &DatabaseConnection,
    owner_uid: &str,
) -> Result<Vec<member::Model>> {
    Member::find()
        .filter(member::Column::OwnerUid.eq(owner_uid))
        .order_by_asc(member::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether `candidate_uid` is one of the owner's members.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn is_member(
    db: &DatabaseConnection,
    owner_uid: &str,
    candidate_uid: &str,
) -> Result<bool> {
    let found = Member::find()
        .filter(member::Column::OwnerUid.eq(owner_uid))
        .filter(member::Column::MemberUid.eq(candidate_uid))
        .one(db)
        .await?;
    Ok(found.is_some())
}

/// Adds a searched user to the owner's member list.
///
/// Rejects adding yourself, and deduplicates on the (owner, member) pair:
/// a user can only be added once.
///
/// # Errors
/// Returns [`Error::InvalidInput`] for self-addition,
/// [`Error::DuplicateMember`] when the pair already exists, or a database
/// error.
pub async fn add_member(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    user: &user_profile::Model,
) -> Result<member::Model> {
    if user.uid == owner_uid {
        return Err(Error::InvalidInput {
            message: "You cannot add yourself as a member".to_string(),
        });
    }

    if is_member(db, owner_uid, &user.uid).await? {
        return Err(Error::DuplicateMember {
            name: user.name.clone(),
        });
    }

    let record = member::ActiveModel {
        owner_uid: Set(owner_uid.to_string()),
        member_uid: Set(user.uid.clone()),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        profile_image: Set(user.profile_image.clone()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let result = record.insert(db).await?;
    info!(owner = owner_uid, member = %user.uid, "member added");
    feed.notify(Collection::Members, owner_uid);
    Ok(result)
}

/// Removes a member from the owner's list.
///
/// Only the list owner holds this relationship, so the owner's uid scopes
/// the lookup; there is no way to remove someone else's member.
///
/// # Errors
/// Returns [`Error::MemberNotFound`] when the relationship does not exist,
/// or a database error.
pub async fn remove_member(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
    member_uid: &str,
) -> Result<()> {
    let Some(record) = Member::find()
        .filter(member::Column::OwnerUid.eq(owner_uid))
        .filter(member::Column::MemberUid.eq(member_uid))
        .one(db)
        .await?
    else {
        return Err(Error::MemberNotFound {
            name: member_uid.to_string(),
        });
    };

    Member::delete_by_id(record.id).exec(db).await?;
    info!(owner = owner_uid, member = member_uid, "member removed");
    feed.notify(Collection::Members, owner_uid);
    Ok(())
}
