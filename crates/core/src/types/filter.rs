//! Catalog filter criteria.
//!
//! Criteria are ephemeral: they belong to whoever is presenting the catalog
//! and are never persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned for an unrecognized sort key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected none, price-asc, price-desc, name-asc or name-desc)")]
pub struct SortKeyError(pub String);

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// All keys, in the order a selector would list them.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            other => Err(SortKeyError(other.to_string())),
        }
    }
}

/// Category restriction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category name.
    Only(String),
}

impl CategoryFilter {
    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// The full set of criteria applied to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    search_term: String,
    pub sort_key: SortKey,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(category: CategoryFilter, search_term: &str, sort_key: SortKey) -> Self {
        let mut criteria = Self {
            category,
            search_term: String::new(),
            sort_key,
        };
        criteria.set_search_term(search_term);
        criteria
    }

    /// The normalized (trimmed, lowercased) search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Replace the search term, normalizing it.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.trim().to_lowercase();
    }

    /// True when the criteria leave the catalog untouched.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.category == CategoryFilter::All
            && self.search_term.is_empty()
            && self.sort_key == SortKey::None
    }
}
