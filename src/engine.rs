//! The cleaning engine: current table, undo history and every operation a
//! host can request.
//!
//! All state is explicit and owned by [`CleaningEngine`]. Mutating entry points
//! follow snapshot-then-mutate: once the request passes input validation the
//! pre-mutation table is pushed to history and replaced, even when no cell
//! changed, so one `undo` always reverts exactly one operation. Requests with
//! an invalid shape, and duplicate scans that found nothing, decline and leave
//! both table and history untouched.

use crate::config::EngineConfig;
use crate::error::{Result, ScrubError};
use crate::history::History;
use crate::io;
use crate::logic::{
    ColumnProfile, FindReplace, KeepStrategy, KeySelector, PageView, SplitRequest,
    TargetLayout, ValidationIssue, ValidationRules, ViewQuery, dates, dedupe, inference, query,
    transforms, validation,
};
use crate::model::{ColumnType, RowId, Table, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Load,
    Clear,
    Restore,
    NormalizeDates,
    RemoveDuplicates,
    TrimWhitespace,
    RemoveEmptyRows,
    SplitColumn,
    FindReplace,
    EditCell,
    Undo,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Clear => "clear",
            Self::Restore => "restore",
            Self::NormalizeDates => "normalize_dates",
            Self::RemoveDuplicates => "remove_duplicates",
            Self::TrimWhitespace => "trim_whitespace",
            Self::RemoveEmptyRows => "remove_empty_rows",
            Self::SplitColumn => "split_column",
            Self::FindReplace => "find_replace",
            Self::EditCell => "edit_cell",
            Self::Undo => "undo",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReport {
    pub operation: OperationKind,
    /// Cells or rows affected, depending on the operation
    pub changed: usize,
    /// Whether the table was replaced (and, for mutations, a snapshot pushed)
    pub recorded: bool,
    pub message: String,
}

impl OperationReport {
    fn applied(operation: OperationKind, changed: usize, message: impl Into<String>) -> Self {
        Self {
            operation,
            changed,
            recorded: true,
            message: message.into(),
        }
    }

    fn skipped(operation: OperationKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            changed: 0,
            recorded: false,
            message: message.into(),
        }
    }
}

/// Result of the first phase of deduplication, bound to the table revision it
/// was computed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateScan {
    pub selector: KeySelector,
    pub count: usize,
    revision: u64,
}

impl DuplicateScan {
    pub fn has_duplicates(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone)]
pub struct CleaningEngine {
    table: Table,
    history: History,
    config: EngineConfig,
    revision: u64,
}

impl Default for CleaningEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CleaningEngine {
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        Self {
            table: Table::default(),
            history: History::new(config.history_capacity),
            config,
            revision: 0,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Monotonic counter bumped whenever the current table is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace_table(&mut self, table: Table) {
        self.table = table;
        self.revision += 1;
    }

    fn commit(&mut self, table: Table) {
        let previous = std::mem::replace(&mut self.table, table);
        self.history.push_snapshot(previous);
        self.revision += 1;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Replaces the current table with a decoded payload and clears history.
    ///
    /// # Errors
    ///
    /// Returns error if the payload cannot be decoded; the current table is kept.
    pub fn load_csv(&mut self, text: &str) -> Result<OperationReport> {
        let table = io::parse_csv(text, &self.config.ingest)?;
        Ok(self.load_table(table))
    }

    pub fn load_table(&mut self, table: Table) -> OperationReport {
        let rows = table.len();
        let columns = table.columns().len();
        self.replace_table(table);
        self.history.clear();
        tracing::info!("Loaded table with {rows} rows and {columns} columns");
        OperationReport::applied(
            OperationKind::Load,
            rows,
            format!("Loaded {rows} rows across {columns} columns"),
        )
    }

    pub fn clear(&mut self) -> OperationReport {
        self.replace_table(Table::default());
        self.history.clear();
        tracing::info!("Cleared table and history");
        OperationReport::applied(OperationKind::Clear, 0, "Cleared table")
    }

    /// # Errors
    ///
    /// Returns error if the table cannot be encoded.
    pub fn export_csv(&self) -> Result<String> {
        io::to_csv(&self.table, &self.config.ingest)
    }

    /// # Errors
    ///
    /// Returns error if the table cannot be encoded.
    pub fn serialize(&self) -> Result<String> {
        io::serialize_table(&self.table)
    }

    /// Restores a persisted blob. A corrupt blob is discarded and the engine
    /// starts from an empty table; this never fails.
    pub fn restore(&mut self, blob: &str) -> OperationReport {
        self.history.clear();
        match io::deserialize_table(blob) {
            Ok(table) => {
                let rows = table.len();
                self.replace_table(table);
                tracing::info!("Restored persisted table with {rows} rows");
                OperationReport::applied(
                    OperationKind::Restore,
                    rows,
                    format!("Restored {rows} rows"),
                )
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable persisted table: {e}");
                self.replace_table(Table::default());
                OperationReport::skipped(
                    OperationKind::Restore,
                    "Stored table was unreadable; starting empty",
                )
            }
        }
    }

    // ------------------------------------------------------------------
    // Profiling
    // ------------------------------------------------------------------

    pub fn infer_type(&self, column: &str) -> ColumnType {
        inference::infer_type(&self.table, column, &self.config.thresholds)
    }

    pub fn column_types(&self) -> Vec<(String, ColumnType)> {
        inference::infer_all(&self.table, &self.config.thresholds)
    }

    pub fn profile(&self) -> Vec<ColumnProfile> {
        inference::profile_table(&self.table, &self.config.thresholds)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Columns offered for date normalization.
    pub fn scan_date_columns(&self) -> Vec<String> {
        dates::scan_for_date_columns(&self.table, &self.config.thresholds)
    }

    pub fn normalize_dates(&mut self, columns: &[String], target: TargetLayout) -> OperationReport {
        let op = OperationKind::NormalizeDates;
        if columns.is_empty() {
            return OperationReport::skipped(op, "No columns selected");
        }
        let (table, stats) = dates::apply_date_normalization(&self.table, columns, target);
        tracing::debug!(
            "Date normalization: {} changed, {} parsed, {} unparsed",
            stats.changed,
            stats.parsed,
            stats.unparsed
        );
        self.commit(table);
        let message = if stats.changed == 0 {
            format!(
                "No dates needed reformatting ({} already in {}, {} left as-is)",
                stats.parsed,
                target.layout().as_str(),
                stats.unparsed
            )
        } else {
            format!(
                "Normalized {} dates to {} ({} values could not be parsed)",
                stats.changed,
                target.layout().as_str(),
                stats.unparsed
            )
        };
        OperationReport::applied(op, stats.changed, message)
    }

    pub fn scan_duplicates(&self, selector: KeySelector) -> DuplicateScan {
        let count = dedupe::scan_duplicates(&self.table, &selector);
        tracing::debug!("Duplicate scan on {selector:?}: {count} duplicates");
        DuplicateScan {
            selector,
            count,
            revision: self.revision,
        }
    }

    /// Second phase of deduplication.
    ///
    /// A scan with no duplicates is reported as informational and records nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::StaleScan`] if the table changed since `scan` was taken.
    pub fn resolve_duplicates(
        &mut self,
        scan: &DuplicateScan,
        strategy: KeepStrategy,
    ) -> Result<OperationReport> {
        let op = OperationKind::RemoveDuplicates;
        if scan.revision != self.revision {
            return Err(ScrubError::StaleScan {
                scanned: scan.revision,
                current: self.revision,
            });
        }
        if scan.count == 0 {
            return Ok(OperationReport::skipped(op, "No duplicates found"));
        }
        let (table, removed) = dedupe::resolve_duplicates(&self.table, &scan.selector, strategy);
        self.commit(table);
        let kept = match strategy {
            KeepStrategy::First => "first",
            KeepStrategy::Last => "last",
        };
        Ok(OperationReport::applied(
            op,
            removed,
            format!("Removed {removed} duplicate rows, keeping the {kept} occurrence"),
        ))
    }

    pub fn trim_whitespace(&mut self) -> OperationReport {
        let op = OperationKind::TrimWhitespace;
        let (table, changed) = transforms::trim_whitespace(&self.table);
        self.commit(table);
        let message = match changed {
            0 => "No whitespace to trim".to_owned(),
            n => format!("Trimmed {n} cells"),
        };
        OperationReport::applied(op, changed, message)
    }

    pub fn remove_empty_rows(&mut self) -> OperationReport {
        let op = OperationKind::RemoveEmptyRows;
        let (table, removed) = transforms::remove_empty_rows(&self.table);
        self.commit(table);
        let message = match removed {
            0 => "No empty rows".to_owned(),
            n => format!("Removed {n} empty rows"),
        };
        OperationReport::applied(op, removed, message)
    }

    pub fn split_column(&mut self, request: &SplitRequest) -> OperationReport {
        let op = OperationKind::SplitColumn;
        let Some((table, rows)) = transforms::split_column(&self.table, request) else {
            tracing::debug!("Ignoring invalid split request: {request:?}");
            return OperationReport::skipped(op, "Split needs a source column and a delimiter");
        };
        self.commit(table);
        OperationReport::applied(
            op,
            rows,
            format!(
                "Split '{}' into '{}' and '{}'",
                request.source, request.first, request.second
            ),
        )
    }

    pub fn find_replace(&mut self, request: &FindReplace) -> OperationReport {
        let op = OperationKind::FindReplace;
        let Some((table, changed)) = transforms::find_replace(&self.table, request) else {
            return OperationReport::skipped(op, "Nothing to find");
        };
        self.commit(table);
        let message = match changed {
            0 => format!("No cells equal to '{}'", request.find),
            n => format!("Replaced {n} occurrences of '{}'", request.find),
        };
        OperationReport::applied(op, changed, message)
    }

    /// Sets one cell, addressed by stable row id.
    pub fn edit_cell(&mut self, id: RowId, column: &str, value: Value) -> OperationReport {
        let op = OperationKind::EditCell;
        if !self.table.has_column(column) {
            return OperationReport::skipped(op, format!("Unknown column '{column}'"));
        }
        let Some(current) = self.table.row(id).map(|r| r.get(column)) else {
            return OperationReport::skipped(op, format!("Unknown row {id}"));
        };
        let changed = usize::from(*current != value);

        let mut table = self.table.clone();
        if let Some(row) = table.row_mut(id) {
            row.set(column, value);
        }
        self.commit(table);
        OperationReport::applied(op, changed, format!("Edited {column} on row {id}"))
    }

    /// Restores the most recent snapshot, including its column list.
    pub fn undo(&mut self) -> OperationReport {
        let op = OperationKind::Undo;
        let Some(entry) = self.history.undo() else {
            return OperationReport::skipped(op, "Nothing to undo");
        };
        let rows = entry.table.len();
        self.replace_table(entry.table);
        tracing::info!(
            "Undo restored snapshot from {} ({rows} rows)",
            entry.timestamp
        );
        let message = if rows == 0 {
            "Restored an empty table".to_owned()
        } else {
            format!("Restored {rows} rows")
        };
        OperationReport::applied(op, rows, message)
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    pub fn view(&self, view_query: &ViewQuery) -> PageView<'_> {
        query::run_view(&self.table, view_query, self.config.page_size)
    }

    pub fn validate(&self, rules: &ValidationRules) -> Vec<ValidationIssue> {
        validation::validate_rows(&self.table, rules)
    }
}
