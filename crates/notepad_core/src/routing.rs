//! Note list view parameters.
//!
//! # Responsibility
//! - Parse sort-key and page-number strings coming from URL queries.
//! - Re-derive the canonical query string for the current list view.
//!
//! # Invariants
//! - Sort keys come from a fixed enumerated set; unknown keys fall back to
//!   [`NoteSortKey::Newest`] on the lenient path.
//! - Page numbers are 1-based and never zero.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Supported list orderings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSortKey {
    /// Most recently created first.
    #[default]
    Newest,
    /// Oldest created first.
    Oldest,
    /// Most recently modified first.
    Updated,
    /// Title ascending, case-insensitive.
    Title,
}

pub const ALL_SORT_KEYS: [NoteSortKey; 4] = [
    NoteSortKey::Newest,
    NoteSortKey::Oldest,
    NoteSortKey::Updated,
    NoteSortKey::Title,
];

impl NoteSortKey {
    /// Stable query-string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Updated => "updated",
            Self::Title => "title",
        }
    }

    /// Parses a key, mapping unknown or blank values to the default.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl Display for NoteSortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortKeyError(pub String);

impl Display for ParseSortKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported sort key `{}`; expected newest|oldest|updated|title",
            self.0
        )
    }
}

impl Error for ParseSortKeyError {}

impl FromStr for NoteSortKey {
    type Err = ParseSortKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "updated" => Ok(Self::Updated),
            "title" => Ok(Self::Title),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

/// Parses a 1-based page number; anything unusable becomes page 1.
pub fn parse_page(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => 1,
        Ok(page) => page,
    }
}

/// Sort + page selection for one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteListParams {
    pub sort: NoteSortKey,
    pub page: u32,
}

impl Default for NoteListParams {
    fn default() -> Self {
        Self {
            sort: NoteSortKey::default(),
            page: 1,
        }
    }
}

impl NoteListParams {
    /// Builds params from raw (possibly missing) query values.
    pub fn from_query(sort: Option<&str>, page: Option<&str>) -> Self {
        Self {
            sort: sort.map(NoteSortKey::parse_lenient).unwrap_or_default(),
            page: page.map(parse_page).unwrap_or(1),
        }
    }

    /// Same view with a different sort key. Changing the order resets paging.
    pub fn with_sort(self, sort: NoteSortKey) -> Self {
        Self { sort, page: 1 }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    /// Row offset for the current page.
    pub fn offset(&self, page_size: u32) -> u32 {
        self.page.saturating_sub(1).saturating_mul(page_size)
    }

    /// Canonical URL query for this view, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        format!("sort={}&page={}", self.sort.as_str(), self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_keys_roundtrip_through_strings() {
        for key in ALL_SORT_KEYS {
            assert_eq!(key.as_str().parse::<NoteSortKey>(), Ok(key));
        }
        assert_eq!(" Title ".parse::<NoteSortKey>(), Ok(NoteSortKey::Title));
    }

    #[test]
    fn unknown_sort_key_is_rejected_strictly_and_defaulted_leniently() {
        assert!("alphabetical".parse::<NoteSortKey>().is_err());
        assert_eq!(NoteSortKey::parse_lenient("alphabetical"), NoteSortKey::Newest);
        assert_eq!(NoteSortKey::parse_lenient(""), NoteSortKey::Newest);
    }

    #[test]
    fn page_parsing_clamps_to_one() {
        assert_eq!(parse_page("3"), 3);
        assert_eq!(parse_page("0"), 1);
        assert_eq!(parse_page("-2"), 1);
        assert_eq!(parse_page("abc"), 1);
        assert_eq!(parse_page(""), 1);
    }

    #[test]
    fn query_string_reflects_current_view() {
        let params = NoteListParams::from_query(Some("updated"), Some("4"));
        assert_eq!(params.to_query_string(), "sort=updated&page=4");
        assert_eq!(params.offset(10), 30);

        let resorted = params.with_sort(NoteSortKey::Title);
        assert_eq!(resorted.to_query_string(), "sort=title&page=1");
        assert_eq!(resorted.offset(10), 0);
    }

    #[test]
    fn missing_query_values_use_defaults() {
        let params = NoteListParams::from_query(None, None);
        assert_eq!(params, NoteListParams::default());
        assert_eq!(params.to_query_string(), "sort=newest&page=1");
    }
}
