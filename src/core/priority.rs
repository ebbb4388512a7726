//! Priority labels and their display and scoring mappings.
//!
//! Stored records carry the priority as a free-form nullable string; records
//! created before the field existed have no value at all. Reading through
//! [`Priority::from_stored`] keeps those records displayable: anything
//! unrecognized falls back to `Important`. That fallback governs how
//! pre-existing records are displayed and must not change.

/// Purchase priority of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Must-have staples
    Essential,
    /// Regular household goods
    Important,
    /// Nice-to-haves
    Optional,
}

/// Display weight for a priority badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// Strong visual emphasis
    High,
    /// Default emphasis
    Medium,
    /// De-emphasized
    Low,
}

impl Priority {
    /// Reads a stored priority value, falling back to `Important` for
    /// missing or unrecognized labels.
    #[must_use]
    pub fn from_stored(stored: Option<&str>) -> Self {
        match stored {
            Some("Essential") => Self::Essential,
            Some("Optional") => Self::Optional,
            _ => Self::Important,
        }
    }

    /// The label persisted for this priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "Essential",
            Self::Important => "Important",
            Self::Optional => "Optional",
        }
    }

    /// Display badge for list rows and detail views.
    #[must_use]
    pub const fn badge(self) -> Badge {
        match self {
            Self::Essential => Badge::High,
            Self::Important => Badge::Medium,
            Self::Optional => Badge::Low,
        }
    }

    /// Base score used by the budget shopping-list generator.
    #[must_use]
    pub const fn score(self) -> u32 {
        match self {
            Self::Essential => 100,
            Self::Important => 50,
            Self::Optional => 10,
        }
    }
}

/// Maps a stored priority value straight to its display badge.
#[must_use]
pub fn priority_badge(stored: Option<&str>) -> Badge {
    Priority::from_stored(stored).badge()
}
