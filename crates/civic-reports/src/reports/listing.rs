//! Search, status filter, sort and pagination over a store snapshot.
//!
//! Category filtering is not repeated here: the snapshot handed in has already
//! been narrowed by [`ReportStore::list_by_category`](super::ReportStore::list_by_category).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{normalize, CategoryFilter, Report, StatusFilter, UnknownVariant};

/// Reports shown per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    Status,
}

impl FromStr for SortField {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "createdat" | "created" | "date" | "time" => Ok(SortField::CreatedAt),
            "status" => Ok(SortField::Status),
            _ => Err(UnknownVariant::new("sort field", raw)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::CreatedAt => f.write_str("created_at"),
            SortField::Status => f.write_str("status"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(UnknownVariant::new("sort direction", raw)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Sort key plus direction. The default lists newest reports first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    fn compare(&self, left: &Report, right: &Report) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => left.created_at.cmp(&right.created_at),
            SortField::Status => left.status.label().cmp(right.status.label()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// User-chosen listing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortOrder,
    /// 1-based; 0 is treated as the first page.
    pub page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: SortOrder::default(),
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort = SortOrder::new(field, direction);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    fn has_search(&self) -> bool {
        !self.search.is_empty()
    }
}

/// One page of listing results plus what pagination controls need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub reports: Vec<Report>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl ListingPage {
    /// Why nothing matched, when nothing did. Pages past the end of a
    /// non-empty result are not considered empty.
    pub fn empty_state(&self, query: &ListingQuery, category: CategoryFilter) -> Option<EmptyState> {
        if self.total_items > 0 {
            return None;
        }
        if query.has_search() || query.status != StatusFilter::All {
            Some(EmptyState::NoMatches)
        } else if category != CategoryFilter::All {
            Some(EmptyState::EmptyCategory)
        } else {
            Some(EmptyState::NoReports)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    NoMatches,
    EmptyCategory,
    NoReports,
}

impl EmptyState {
    pub fn message(self, category: CategoryFilter) -> String {
        match self {
            EmptyState::NoMatches => {
                "No reports match your search criteria. Try a different search term.".to_string()
            }
            EmptyState::EmptyCategory => format!(
                "No {} reports have been submitted yet.",
                category.label()
            ),
            EmptyState::NoReports => "No reports have been submitted yet.".to_string(),
        }
    }
}

/// Reduce a snapshot to one page: filter, then stable sort, then slice.
pub fn run_listing(snapshot: &[Report], query: &ListingQuery, page_size: usize) -> ListingPage {
    let page_size = page_size.max(1);
    let page = query.page.max(1);
    let needle = query.search.to_lowercase();

    let mut matching: Vec<&Report> = snapshot
        .iter()
        .filter(|report| report.mentions(&needle) && query.status.matches(report.status))
        .collect();
    matching.sort_by(|left, right| query.sort.compare(left, right));

    let total_items = matching.len();
    let total_pages = total_items.div_ceil(page_size);
    let offset = (page - 1).saturating_mul(page_size);

    let reports = matching
        .into_iter()
        .skip(offset)
        .take(page_size)
        .cloned()
        .collect();

    ListingPage {
        reports,
        page,
        page_size,
        total_items,
        total_pages,
    }
}
