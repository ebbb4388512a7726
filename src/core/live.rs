//! Change notifications and live collection snapshots.
//!
//! List views track a collection through a subscription: acquire on
//! screen-enter, release on screen-exit. A [`ChangeSubscription`] is the
//! scoped resource - dropping it (or calling
//! [`ChangeSubscription::unsubscribe`]) releases the underlying channel, so
//! no notification can ever reach a view that is gone.
//!
//! Every mutating core operation publishes to the [`ChangeFeed`] for its
//! collection and owner. Snapshot watchers respond to a notification by
//! re-querying the whole collection: each snapshot is the authoritative full
//! replacement of the previous one, never a merge.

use crate::core::{inventory, shopping};
use crate::entities::{inventory_item, shopping_entry};
use crate::errors::Result;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// The collections list views can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Per-owner inventory items
    Inventory,
    /// Per-owner expiry reminders
    Reminders,
    /// Per-owner shopping list entries
    ShoppingList,
    /// Per-owner member relationships
    Members,
}

type ChannelKey = (Collection, String);
type ChannelMap = HashMap<ChannelKey, watch::Sender<u64>>;

/// Registry of change channels keyed by collection and owner.
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ChangeFeed {
    channels: Arc<Mutex<ChannelMap>>,
}

impl ChangeFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ChannelMap> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes to change notifications for one collection and owner.
    ///
    /// The returned subscription only signals that something changed; callers
    /// re-query for the actual data (or use a snapshot watcher, which does so
    /// for them).
    #[must_use]
    pub fn subscribe(&self, collection: Collection, owner_uid: &str) -> ChangeSubscription {
        let mut channels = self.lock();
        let tx = channels
            .entry((collection, owner_uid.to_string()))
            .or_insert_with(|| watch::channel(0).0);
        ChangeSubscription { rx: tx.subscribe() }
    }

    /// Publishes a change notification for one collection and owner.
    ///
    /// Channels whose last subscriber has gone away are removed here instead
    /// of lingering in the registry.
    pub fn notify(&self, collection: Collection, owner_uid: &str) {
        let mut channels = self.lock();
        let key = (collection, owner_uid.to_string());
        if let Some(tx) = channels.get(&key) {
            if tx.receiver_count() == 0 {
                channels.remove(&key);
            } else {
                tx.send_modify(|version| *version += 1);
            }
        }
    }

    /// Number of live channels in the registry.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.lock().len()
    }
}

/// A held subscription to one collection's change notifications.
///
/// Dropping the subscription releases it; `unsubscribe` makes the release
/// explicit at screen teardown.
#[derive(Debug)]
pub struct ChangeSubscription {
    rx: watch::Receiver<u64>,
}

impl ChangeSubscription {
    /// Waits for the next change notification.
    ///
    /// Returns `false` if the feed side has gone away, in which case no
    /// further notifications will arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Whether a notification has arrived since the last `changed` call.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Releases the subscription.
    pub fn unsubscribe(self) {}
}

/// Live full-snapshot view of one owner's inventory.
#[derive(Debug)]
pub struct InventorySnapshots {
    db: DatabaseConnection,
    owner_uid: String,
    subscription: ChangeSubscription,
}

impl InventorySnapshots {
    /// The current full state of the owner's inventory.
    pub async fn current(&self) -> Result<Vec<inventory_item::Model>> {
        inventory::items_for_owner(&self.db, &self.owner_uid).await
    }

    /// Waits for the next mutation, then returns the full post-mutation
    /// state. Returns `None` once the feed has gone away.
    pub async fn next(&mut self) -> Result<Option<Vec<inventory_item::Model>>> {
        if !self.subscription.changed().await {
            return Ok(None);
        }
        self.current().await.map(Some)
    }

    /// Releases the underlying subscription.
    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}

/// Live full-snapshot view of one owner's shopping list.
#[derive(Debug)]
pub struct ShoppingSnapshots {
    db: DatabaseConnection,
    owner_uid: String,
    subscription: ChangeSubscription,
}

impl ShoppingSnapshots {
    /// The current full state of the owner's shopping list.
    pub async fn current(&self) -> Result<Vec<shopping_entry::Model>> {
        shopping::entries_for_owner(&self.db, &self.owner_uid).await
    }

    /// Waits for the next mutation, then returns the full post-mutation
    /// state. Returns `None` once the feed has gone away.
    pub async fn next(&mut self) -> Result<Option<Vec<shopping_entry::Model>>> {
        if !self.subscription.changed().await {
            return Ok(None);
        }
        self.current().await.map(Some)
    }

    /// Releases the underlying subscription.
    pub fn unsubscribe(self) {
        self.subscription.unsubscribe();
    }
}

/// Starts a live snapshot view of an owner's inventory.
#[must_use]
pub fn watch_inventory(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
) -> InventorySnapshots {
    InventorySnapshots {
        db: db.clone(),
        owner_uid: owner_uid.to_string(),
        subscription: feed.subscribe(Collection::Inventory, owner_uid),
    }
}

/// Starts a live snapshot view of an owner's shopping list.
#[must_use]
pub fn watch_shopping_list(
    db: &DatabaseConnection,
    feed: &ChangeFeed,
    owner_uid: &str,
) -> ShoppingSnapshots {
    ShoppingSnapshots {
        db: db.clone(),
        owner_uid: owner_uid.to_string(),
        subscription: feed.subscribe(Collection::ShoppingList, owner_uid),
    }
}
