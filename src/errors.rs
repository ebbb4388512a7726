//! Unified error types and result handling.
//!
//! All fallible operations in the crate return [`Result`], which wraps the
//! crate-wide [`Error`] enum. Validation failures are distinct variants so
//! callers can resolve them at the point of entry without touching the store;
//! store and collaborator failures convert in via `#[from]`.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A user-entered value failed validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the value
        message: String,
    },

    /// A stock or quantity input did not parse as a non-negative number
    #[error("Invalid quantity: {input:?}")]
    InvalidQuantity {
        /// The raw user input
        input: String,
    },

    /// A monetary amount was negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// A date input was malformed or not a real calendar date
    #[error("Invalid date: {input:?} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The raw user input
        input: String,
    },

    /// A date input parsed but lies before today
    #[error("Date {input:?} is in the past")]
    PastDate {
        /// The raw user input
        input: String,
    },

    /// Caller identity does not own the record it tried to mutate
    #[error("Not authorized: {message}")]
    NotAuthorized {
        /// Which check failed
        message: String,
    },

    /// Inventory item lookup failed
    #[error("Inventory item not found: {id}")]
    ItemNotFound {
        /// Identifier used for the lookup
        id: String,
    },

    /// Expiry reminder lookup failed
    #[error("Expiry reminder not found: {id}")]
    ReminderNotFound {
        /// Identifier used for the lookup
        id: String,
    },

    /// Shopping list entry lookup failed
    #[error("Shopping list entry not found: {id}")]
    EntryNotFound {
        /// Identifier used for the lookup
        id: String,
    },

    /// Member relationship lookup failed
    #[error("Member not found: {name}")]
    MemberNotFound {
        /// Member name or uid used for the lookup
        name: String,
    },

    /// No registered user matched the searched email
    #[error("No user found with email {email}")]
    UserNotFound {
        /// The searched email address
        email: String,
    },

    /// The member relationship already exists
    #[error("{name} is already a member")]
    DuplicateMember {
        /// Display name of the duplicate member
        name: String,
    },

    /// The receipt-parsing service returned unusable data
    #[error("Receipt parsing failed: {message}")]
    ParseFailure {
        /// Service-reported or derived failure description
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP transport error talking to an external collaborator
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
