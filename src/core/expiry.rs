//! Expiry date derivation - parsing, urgency classification, and filtering.
//!
//! Everything in this module is a pure function of its inputs: classification
//! takes the caller's `today` explicitly so results are deterministic and
//! testable. Malformed dates never raise - they degrade to an unknown
//! urgency which list filters treat as "no expiry information".

use crate::entities::inventory_item;
use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

static STRICT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("hard-coded date pattern"));

/// Urgency band derived from an item's expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Expiry date has passed
    Expired,
    /// Expires today or within two days
    Critical,
    /// Expires in three to seven days
    Soon,
    /// More than seven days left
    Safe,
    /// No expiry date, or one that could not be parsed
    Unknown,
}

/// Result of classifying an expiry date against a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryStatus {
    /// Whole days until expiry; negative when already expired; `None` when
    /// no date is available
    pub days_remaining: Option<i64>,
    /// Urgency band for display and sorting
    pub urgency: Urgency,
}

/// Filter applied to list views based on days until expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryFilter {
    /// Every item, including those without an expiry date
    All,
    /// Items expiring within seven days, already-expired items included
    WithinSevenDays,
    /// Items with more than seven days left
    MoreThanSevenDays,
}

/// Parses a stored expiry value leniently.
///
/// Accepts the canonical `YYYY-MM-DD` form first, then the formats older
/// records and scanner output have been observed to carry: ISO datetimes,
/// `MM/DD/YYYY`, and `YYYY/MM/DD`. Returns `None` when nothing matches.
#[must_use]
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%M:%SZ"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    None
}

/// Parses a user-entered date under the reminder-form rules: the input must
/// have the exact `YYYY-MM-DD` shape and name a real calendar date.
///
/// # Errors
/// Returns [`Error::InvalidDate`] when either check fails.
pub fn parse_strict_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if !STRICT_DATE_RE.is_match(trimmed) {
        return Err(Error::InvalidDate {
            input: raw.to_string(),
        });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        input: raw.to_string(),
    })
}

/// Classifies an expiry value against `today`.
///
/// Both sides are date-only: any time-of-day component in the stored value is
/// discarded before subtraction. The bands are:
/// - `days_remaining < 0` - [`Urgency::Expired`]
/// - `0..=2` - [`Urgency::Critical`]
/// - `3..=7` - [`Urgency::Soon`]
/// - `> 7` - [`Urgency::Safe`]
///
/// A missing or unparseable date yields `days_remaining = None` and
/// [`Urgency::Unknown`].
#[must_use]
pub fn classify_expiry(raw: Option<&str>, today: NaiveDate) -> ExpiryStatus {
    let Some(date) = raw.and_then(parse_expiry_date) else {
        return ExpiryStatus {
            days_remaining: None,
            urgency: Urgency::Unknown,
        };
    };

    let days = date.signed_duration_since(today).num_days();
    let urgency = match days {
        d if d < 0 => Urgency::Expired,
        0..=2 => Urgency::Critical,
        3..=7 => Urgency::Soon,
        _ => Urgency::Safe,
    };
    ExpiryStatus {
        days_remaining: Some(days),
        urgency,
    }
}

/// Formats a day count for display.
///
/// Negative counts render as their absolute value with an "ago" suffix; the
/// raw negative number is never shown.
#[must_use]
pub fn format_days_remaining(days: i64) -> String {
    match days {
        d if d < 0 => format!("{} days ago", d.abs()),
        0 => "expires today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}

/// Filters inventory items by their expiry horizon.
///
/// `WithinSevenDays` keeps items with `days_remaining <= 7`, which includes
/// already-expired items; `MoreThanSevenDays` keeps `days_remaining > 7`.
/// Items without a parseable expiry date only appear under `All`. The
/// returned iterator is lazy and restartable, and preserves input order.
pub fn filter_by_expiry(
    items: &[inventory_item::Model],
    today: NaiveDate,
    filter: ExpiryFilter,
) -> impl Iterator<Item = &inventory_item::Model> {
    items.iter().filter(move |item| {
        let status = classify_expiry(item.expiry_date.as_deref(), today);
        match filter {
            ExpiryFilter::All => true,
            ExpiryFilter::WithinSevenDays => {
                matches!(status.days_remaining, Some(d) if d <= 7)
            }
            ExpiryFilter::MoreThanSevenDays => {
                matches!(status.days_remaining, Some(d) if d > 7)
            }
        }
    })
}
