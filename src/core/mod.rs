//! Core business logic - framework-agnostic inventory, reminder, shopping,
//! member, and budget operations.
//!
//! Derivation functions (expiry classification, priority mapping, budget
//! scoring) are pure and take explicit `today`/identity parameters. Store
//! operations are async functions over a [`sea_orm::DatabaseConnection`];
//! every mutation publishes a change notification through [`live::ChangeFeed`]
//! so list views can refresh their snapshots.

/// Budget-constrained shopping list generation and budget totals
pub mod budget;
/// Expiry date parsing, urgency classification, and expiry-based filtering
pub mod expiry;
/// Inventory item CRUD and scanned-item commit
pub mod inventory;
/// Change notifications and live collection snapshots
pub mod live;
/// Member relationships and user search
pub mod member;
/// Priority labels and their display/scoring mappings
pub mod priority;
/// User profile directory operations
pub mod profile;
/// Expiry reminder CRUD and shopping-list conversion
pub mod reminder;
/// Shopping list CRUD with member access
pub mod shopping;
/// Stock update decision flow
pub mod stock;
