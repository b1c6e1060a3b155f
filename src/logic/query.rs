//! Display pipeline: search filter, stable sort, pagination.
//!
//! Everything here is a read-only projection of the current table; nothing is
//! mutated and no history is recorded.

use crate::model::{Row, Table};
use serde::{Deserialize, Serialize};

/// Direction of a view sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Column to sort the view by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Inputs of one view computation. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    pub search: String,
    pub sort: Option<SortSpec>,
    pub page: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
        }
    }
}

/// One page of the filtered, sorted view, borrowing rows from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Row>,
    /// Page actually shown, after clamping into range
    pub page: usize,
    pub total_pages: usize,
    /// Rows left after filtering
    pub filtered_count: usize,
}

/// Rows where any cell contains the term, case-insensitively. An empty term keeps everything.
pub fn filter_rows<'a>(table: &'a Table, term: &str) -> Vec<&'a Row> {
    if term.is_empty() {
        return table.rows().iter().collect();
    }
    let needle = term.to_lowercase();
    table
        .rows()
        .iter()
        .filter(|row| {
            row.cells
                .values()
                .any(|v| v.as_text().to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort on the raw cell values; ties keep their input order.
pub fn sort_rows(rows: &mut [&Row], spec: &SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = a.get(&spec.column).natural_cmp(b.get(&spec.column));
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Pages needed for `count` rows; zero rows is zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Filter, then sort, then paginate.
///
/// `query.page` is clamped into `1..=total_pages`, so an out-of-range page
/// shows the last page (or page 1 of an empty result).
pub fn run_view<'a>(table: &'a Table, query: &ViewQuery, page_size: usize) -> PageView<'a> {
    let page_size = page_size.max(1);
    let mut rows = filter_rows(table, &query.search);
    if let Some(spec) = &query.sort {
        sort_rows(&mut rows, spec);
    }

    let filtered_count = rows.len();
    let total_pages = total_pages(filtered_count, page_size);
    let page = query.page.clamp(1, total_pages.max(1));
    let rows = rows
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    PageView {
        rows,
        page,
        total_pages,
        filtered_count,
    }
}
