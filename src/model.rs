//! In-memory table representation shared by every cleaning operation.
//!
//! A [`Table`] is an ordered list of [`Row`]s plus an explicit column list.
//! Cells are [`Value`]s: a tagged scalar so each consumer decides how to treat
//! numbers, text and blanks instead of relying on implicit coercion.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A single cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Stringified form used for search, dedupe keys, find/replace and export.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Number(n) => Cow::Owned(format_number(*n)),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Empty => Cow::Borrowed(""),
        }
    }

    /// Numeric reading of the cell: numbers as-is, text when it parses as a finite float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => parse_number(s),
            Self::Number(_) | Self::Empty => None,
        }
    }

    /// True for `Empty` and for the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// True for `Empty` and for whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Total order used by the view sort: numbers, then text, then blanks.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Empty, Self::Empty) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Text(_) => 1,
            Self::Empty => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Parses trimmed text as a finite float; `inf`/`NaN` spellings are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n == n.trunc() && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// Surrogate row identity assigned when a table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    /// Missing keys read as [`Value::Empty`].
    pub fn get(&self, column: &str) -> &Value {
        const EMPTY: &Value = &Value::Empty;
        self.cells.get(column).unwrap_or(EMPTY)
    }

    pub fn set(&mut self, column: impl Into<String>, value: Value) {
        self.cells.insert(column.into(), value);
    }

    /// Builder-style setter, handy in fixtures.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value.into());
        self
    }
}

/// An ordered sequence of rows sharing a column set.
///
/// Row ids are ascending in row order. Every mutating operation keeps the
/// relative order of surviving rows, so the invariant holds across the whole
/// lifetime of a table and lookups by id are binary searches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from raw cell maps, assigning fresh ids `0..n`.
    pub fn from_records(columns: Vec<String>, records: Vec<BTreeMap<String, Value>>) -> Self {
        let rows = records
            .into_iter()
            .zip(0_u64..)
            .map(|(cells, id)| Row {
                id: RowId(id),
                cells,
            })
            .collect();
        Self { columns, rows }
    }

    /// Builds a table from rows that already carry ids. Ids are reassigned if
    /// they are not strictly ascending.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Self { columns, rows };
        table.ensure_ascending_ids();
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Values of one column in row order.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |r| r.get(name))
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.binary_search_by_key(&id, |r| r.id).ok()
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.position(id).and_then(|idx| self.rows.get(idx))
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        let idx = self.position(id)?;
        self.rows.get_mut(idx)
    }

    pub fn push_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_column(&name) {
            self.columns.push(name);
        }
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Keeps rows matching the predicate, preserving order.
    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(keep);
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    fn ensure_ascending_ids(&mut self) {
        let ascending = self.rows.windows(2).all(|w| match w {
            [a, b] => a.id < b.id,
            _ => true,
        });
        if !ascending {
            for (row, id) in self.rows.iter_mut().zip(0_u64..) {
                row.id = RowId(id);
            }
        }
    }
}

/// Semantic classification of a column, recomputed from current values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Date,
    Text,
    Mixed,
    Empty,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Date => "Date",
            Self::Text => "Text",
            Self::Mixed => "Mixed",
            Self::Empty => "Empty",
        }
    }

    /// Columns offered for date normalization.
    pub fn is_date_candidate(&self) -> bool {
        matches!(self, Self::Date | Self::Mixed)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
