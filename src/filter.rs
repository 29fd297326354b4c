//! Pure record filtering.
//!
//! Filters never mutate their input: each call returns a new vector, so a
//! chain of filters is a chain of derived tables. All predicates are
//! conjunctive, which makes composition order irrelevant to the result.

use chrono::NaiveDate;

use crate::models::{AgentPick, DateRange, MatchRound};

/// Records that carry a date and can be range-filtered.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for MatchRound {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for AgentPick {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Keep records whose date falls inside `range`, both bounds inclusive.
///
/// An inverted range (`from > to`) yields an empty result, not an error.
pub fn filter_by_date_range<T: Dated + Clone>(records: &[T], range: &DateRange) -> Vec<T> {
    if range.from > range.to {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| range.contains(r.date()))
        .cloned()
        .collect()
}

/// A categorical selection where `All` is the identity filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    /// Build a filter from a UI-style selection string; `"All"` (any case)
    /// means no filtering.
    pub fn from_selection(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.trim().to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => only == value,
        }
    }
}

/// Keep records whose `key` field matches the filter.
pub fn filter_by_category<T, F>(records: &[T], filter: &CategoryFilter, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    records
        .iter()
        .filter(|r| filter.matches(key(r)))
        .cloned()
        .collect()
}
