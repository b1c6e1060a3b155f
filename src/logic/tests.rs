#![expect(clippy::unwrap_used)]
use crate::model::{Table, Value};
use std::collections::BTreeMap;

mod dedupe;
mod inference;
mod transforms;

/// Builds a text table; `""` cells become `Value::Empty`.
pub(super) fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let columns: Vec<String> = columns.iter().map(|c| (*c).to_owned()).collect();
    let records = rows
        .iter()
        .map(|cells| {
            columns
                .iter()
                .zip(cells.iter())
                .map(|(c, v)| {
                    let value = if v.is_empty() {
                        Value::Empty
                    } else {
                        Value::text(*v)
                    };
                    (c.clone(), value)
                })
                .collect::<BTreeMap<_, _>>()
        })
        .collect();
    Table::from_records(columns, records)
}

/// Single column table.
pub(super) fn column(name: &str, values: &[&str]) -> Table {
    let rows: Vec<[&str; 1]> = values.iter().map(|v| [*v]).collect();
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    table(&[name], &rows)
}

/// Stringified cells of one column.
pub(super) fn texts(table: &Table, name: &str) -> Vec<String> {
    table
        .column_values(name)
        .map(|v| v.as_text().into_owned())
        .collect()
}
