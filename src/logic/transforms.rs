//! Row-level cleaning transforms.
//!
//! Each transform takes a table by reference and returns a fresh table plus a
//! change count. Requests with invalid shape return `None` so callers can skip
//! the operation entirely.

use crate::model::{Table, Value};
use serde::{Deserialize, Serialize};

/// Strips leading and trailing whitespace from every text cell.
pub fn trim_whitespace(table: &Table) -> (Table, usize) {
    let mut out = table.clone();
    let mut changed = 0;
    for row in out.rows_mut() {
        for value in row.cells.values_mut() {
            if let Value::Text(s) = value {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_owned();
                    changed += 1;
                }
            }
        }
    }
    (out, changed)
}

/// Drops rows where every column is empty, blank or absent.
pub fn remove_empty_rows(table: &Table) -> (Table, usize) {
    let mut out = table.clone();
    out.retain_rows(|row| row.cells.values().any(|v| !v.is_blank()));
    let removed = table.len() - out.len();
    (out, removed)
}

/// Split one column into two on the first delimiter occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub source: String,
    pub delimiter: String,
    pub first: String,
    pub second: String,
}

impl SplitRequest {
    pub fn new(
        source: impl Into<String>,
        delimiter: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            delimiter: delimiter.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Source, delimiter and both destinations must be non-empty, destinations
    /// distinct, and the source must exist.
    pub fn is_valid_for(&self, table: &Table) -> bool {
        !self.source.is_empty()
            && !self.delimiter.is_empty()
            && !self.first.is_empty()
            && !self.second.is_empty()
            && self.first != self.second
            && table.has_column(&self.source)
    }
}

/// Splits `value` at the first delimiter: the head, and the rest rejoined.
pub fn split_value<'a>(value: &'a str, delimiter: &str) -> (&'a str, &'a str) {
    value.split_once(delimiter).unwrap_or((value, ""))
}

/// Splits the source column into two destination columns appended to the
/// schema. Existing destination columns are overwritten row by row.
pub fn split_column(table: &Table, request: &SplitRequest) -> Option<(Table, usize)> {
    if !request.is_valid_for(table) {
        return None;
    }

    let mut out = table.clone();
    out.push_column(request.first.clone());
    out.push_column(request.second.clone());

    for row in out.rows_mut() {
        let source = row.get(&request.source).as_text().into_owned();
        let (head, rest) = split_value(&source, &request.delimiter);
        let (head, rest) = (Value::text(head), Value::text(rest));
        row.set(request.first.clone(), head);
        row.set(request.second.clone(), rest);
    }

    let rows = out.len();
    Some((out, rows))
}

/// Columns a find-and-replace looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplaceScope {
    #[default]
    AllColumns,
    Column(String),
}

/// Whole-cell replacement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindReplace {
    pub find: String,
    pub replace: String,
    pub scope: ReplaceScope,
}

impl FindReplace {
    pub fn new(find: impl Into<String>, replace: impl Into<String>, scope: ReplaceScope) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
            scope,
        }
    }
}

/// Replaces cells whose whole stringified value equals `find`. Substrings are
/// never touched. An empty `find` is rejected.
pub fn find_replace(table: &Table, request: &FindReplace) -> Option<(Table, usize)> {
    if request.find.is_empty() {
        return None;
    }

    let columns: Vec<String> = match &request.scope {
        ReplaceScope::AllColumns => table.columns().to_vec(),
        ReplaceScope::Column(name) if table.has_column(name) => vec![name.clone()],
        ReplaceScope::Column(_) => return None,
    };

    let mut out = table.clone();
    let mut changed = 0;
    for row in out.rows_mut() {
        for column in &columns {
            if row.get(column).as_text() == request.find {
                row.set(column.clone(), Value::text(request.replace.clone()));
                changed += 1;
            }
        }
    }
    Some((out, changed))
}
