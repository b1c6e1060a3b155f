//! Duplicate detection and removal.

use crate::model::{Row, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rule defining when two rows are the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySelector {
    /// All fields equal, type included (`1` and `"1"` differ)
    WholeRow,
    /// Stringified value of one column equal
    Column(String),
}

/// Which occurrence of a duplicated key survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeepStrategy {
    #[default]
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyPart {
    Number(String),
    Text(String),
    Empty,
}

impl From<&Value> for KeyPart {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(_) => Self::Number(value.as_text().into_owned()),
            Value::Text(s) => Self::Text(s.clone()),
            Value::Empty => Self::Empty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RowKey {
    Whole(Vec<KeyPart>),
    Column(String),
}

fn row_key(row: &Row, columns: &[String], selector: &KeySelector) -> RowKey {
    match selector {
        KeySelector::WholeRow => {
            RowKey::Whole(columns.iter().map(|c| KeyPart::from(row.get(c))).collect())
        }
        KeySelector::Column(name) => RowKey::Column(row.get(name).as_text().into_owned()),
    }
}

/// Number of rows whose key already appeared earlier, scanning top to bottom.
pub fn scan_duplicates(table: &Table, selector: &KeySelector) -> usize {
    let mut seen = HashSet::new();
    table
        .rows()
        .iter()
        .filter(|row| !seen.insert(row_key(row, table.columns(), selector)))
        .count()
}

fn keep_first<'a>(
    rows: impl Iterator<Item = &'a Row>,
    columns: &[String],
    selector: &KeySelector,
) -> Vec<Row> {
    let mut seen = HashSet::new();
    rows.filter(|row| seen.insert(row_key(row, columns, selector)))
        .cloned()
        .collect()
}

/// Removes duplicate rows, returning the new table and the number removed.
///
/// `Last` is `First` applied to the reversed rows and reversed back, so for each
/// key the last occurrence survives while kept rows keep their relative order.
pub fn resolve_duplicates(
    table: &Table,
    selector: &KeySelector,
    strategy: KeepStrategy,
) -> (Table, usize) {
    let columns = table.columns();
    let kept = match strategy {
        KeepStrategy::First => keep_first(table.rows().iter(), columns, selector),
        KeepStrategy::Last => {
            let mut kept = keep_first(table.rows().iter().rev(), columns, selector);
            kept.reverse();
            kept
        }
    };
    let removed = table.len() - kept.len();
    (Table::from_rows(columns.to_vec(), kept), removed)
}
