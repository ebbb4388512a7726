//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod expiry_reminder;
pub mod inventory_item;
pub mod member;
pub mod shopping_entry;
pub mod user_profile;

// Re-export specific types to avoid conflicts
pub use expiry_reminder::{
    Column as ExpiryReminderColumn, Entity as ExpiryReminder, Model as ExpiryReminderModel,
};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use shopping_entry::{
    Column as ShoppingEntryColumn, Entity as ShoppingEntry, Model as ShoppingEntryModel,
};
pub use user_profile::{
    Column as UserProfileColumn, Entity as UserProfile, Model as UserProfileModel,
};
