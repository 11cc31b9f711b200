//! The caller-facing filter descriptor: search text, sort path and paging.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order for a shaped query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest key first. This is the default.
    #[default]
    Asc,
    /// Largest key first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
        )
    }
}

/// Search, sort and page intent supplied by a caller.
///
/// Read-only once built. Field names match the camelCase transport shape
/// (`search`, `sortByColumn`, `isAscending`, `pageIndex`, `pageSize`) so a
/// transport layer can deserialize it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilter {
    search: Option<String>,
    sort_by_column: Option<String>,
    is_ascending: Option<bool>,
    page_index: Option<i64>,
    page_size: Option<i64>,
}

impl ListFilter {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    /// Sets the sort path, dot-separated for nested fields (e.g. `address.city`).
    pub fn with_sort_by_column(mut self, column: &str) -> Self {
        self.sort_by_column = Some(column.to_string());
        self
    }

    pub fn with_is_ascending(mut self, is_ascending: bool) -> Self {
        self.is_ascending = Some(is_ascending);
        self
    }

    pub fn with_sort_direction(self, direction: SortDirection) -> Self {
        self.with_is_ascending(direction == SortDirection::Asc)
    }

    /// Sets the 1-based page index.
    pub fn with_page_index(mut self, page_index: i64) -> Self {
        self.page_index = Some(page_index);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// The search term, or `None` when absent or empty.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// The trimmed sort path, or `None` when absent or blank.
    pub fn sort_by_column(&self) -> Option<&str> {
        self.sort_by_column
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn is_ascending(&self) -> Option<bool> {
        self.is_ascending
    }

    /// Descending only when explicitly requested.
    pub fn direction(&self) -> SortDirection {
        match self.is_ascending {
            Some(false) => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn page_index(&self) -> Option<i64> {
        self.page_index
    }

    pub fn page_size(&self) -> Option<i64> {
        self.page_size
    }

    /// Page index and size, only when both are set.
    pub fn pagination(&self) -> Option<(i64, i64)> {
        Some((self.page_index?, self.page_size?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mean_no_shaping() {
        let filter = ListFilter::default();
        assert_eq!(filter.search(), None);
        assert_eq!(filter.sort_by_column(), None);
        assert_eq!(filter.direction(), SortDirection::Asc);
        assert_eq!(filter.pagination(), None);
    }

    #[test]
    fn blank_values_are_unset() {
        let filter = ListFilter::default()
            .with_search("")
            .with_sort_by_column("   ");
        assert_eq!(filter.search(), None);
        assert_eq!(filter.sort_by_column(), None);
    }

    #[test]
    fn pagination_needs_both_values() {
        let filter = ListFilter::default().with_page_index(2);
        assert_eq!(filter.pagination(), None);
        let filter = filter.with_page_size(10);
        assert_eq!(filter.pagination(), Some((2, 10)));
    }

    #[test]
    fn direction_follows_is_ascending() {
        let filter = ListFilter::default().with_is_ascending(false);
        assert_eq!(filter.direction(), SortDirection::Desc);
        let filter = filter.with_sort_direction(SortDirection::Asc);
        assert_eq!(filter.is_ascending(), Some(true));
    }

    #[test]
    fn deserializes_transport_shape() {
        let filter: ListFilter = serde_json::from_str(
            r#"{"search":"nnn","sortByColumn":"address.city","isAscending":false,"pageIndex":1,"pageSize":2}"#,
        )
        .unwrap();
        assert_eq!(filter.search(), Some("nnn"));
        assert_eq!(filter.sort_by_column(), Some("address.city"));
        assert_eq!(filter.direction(), SortDirection::Desc);
        assert_eq!(filter.pagination(), Some((1, 2)));
    }

    #[test]
    fn sort_direction_from_str() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert_eq!("ascending".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
