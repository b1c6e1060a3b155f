//! Delimited-text ingest/export and the persistence blob.

use crate::config::IngestOptions;
use crate::error::{Result, ResultExt as _, ScrubError};
use crate::model::{Table, Value, parse_number};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BLOB_FORMAT_VERSION: u32 = 1;

fn decode_field(field: &str, options: &IngestOptions) -> Value {
    if field.is_empty() {
        return Value::Empty;
    }
    if options.infer_numbers
        && let Some(n) = parse_number(field)
    {
        return Value::Number(n);
    }
    Value::text(field)
}

/// Column names for a header row, one per field. A repeated name gets a
/// numeric suffix (`a`, `a_2`, `a_3`) so every field keeps its own column.
fn header_columns(headers: &StringRecord) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers {
        let mut candidate = name.to_owned();
        let mut suffix = 2;
        while columns.contains(&candidate) {
            candidate = format!("{name}_{suffix}");
            suffix += 1;
        }
        columns.push(candidate);
    }
    columns
}

/// Decodes a payload whose first line is the header row.
///
/// Rows are decoded positionally; short rows leave the missing columns empty
/// and surplus fields are ignored. Blank lines are skipped by the reader; a
/// record holding a single empty field is a row.
///
/// # Errors
///
/// Returns error if the header row or a record cannot be read.
pub fn parse_csv(text: &str, options: &IngestOptions) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = header_columns(reader.headers().context("Failed to read CSV header row")?);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
        let cells: BTreeMap<String, Value> = columns
            .iter()
            .zip(record.iter())
            .map(|(c, field)| (c.clone(), decode_field(field, options)))
            .collect();
        records.push(cells);
    }

    tracing::debug!(
        "Parsed CSV payload: {} columns, {} rows",
        columns.len(),
        records.len()
    );
    Ok(Table::from_records(columns, records))
}

/// Encodes the table with the same header-row convention used for ingest.
///
/// # Errors
///
/// Returns error if a record cannot be written.
pub fn to_csv(table: &Table, options: &IngestOptions) -> Result<String> {
    if table.columns().is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(table.columns().iter().map(|c| row.get(c).as_text().into_owned()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScrubError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ScrubError::Csv(e.to_string()))
}

#[derive(Serialize, Deserialize)]
struct PersistedTable {
    version: u32,
    table: Table,
}

/// Opaque blob a host can store between sessions.
///
/// # Errors
///
/// Returns error if the table cannot be encoded.
pub fn serialize_table(table: &Table) -> Result<String> {
    #[derive(Serialize)]
    struct PersistedRef<'a> {
        version: u32,
        table: &'a Table,
    }

    serde_json::to_string(&PersistedRef {
        version: BLOB_FORMAT_VERSION,
        table,
    })
    .context("Failed to serialize table")
}

/// # Errors
///
/// Returns error if the blob is not valid JSON, has the wrong shape, or was
/// written by an unknown format version.
pub fn deserialize_table(blob: &str) -> Result<Table> {
    let persisted: PersistedTable =
        serde_json::from_str(blob).context("Failed to deserialize table")?;
    if persisted.version != BLOB_FORMAT_VERSION {
        return Err(ScrubError::Serialization(format!(
            "Unsupported blob version {}, expected {BLOB_FORMAT_VERSION}",
            persisted.version
        )));
    }
    let (columns, rows) = persisted.table.into_parts();
    Ok(Table::from_rows(columns, rows))
}
