//! Column type inference and profiling.
//!
//! A column is classified from its non-empty values only. Uniform columns are
//! `Numeric` or `Date`; columns where a strong majority agrees are `Mixed`;
//! everything else is `Text`.

use super::dates::parse_candidate;
use crate::config::InferenceThresholds;
use crate::model::{ColumnType, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SAMPLE_LIMIT: usize = 5;

/// Counts behind a classification, exposed for profiling and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub total: usize,
    pub numeric: usize,
    pub dates: usize,
}

impl TypeCounts {
    /// Tallies non-empty values. A value can count as both numeric and date.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut counts = Self::default();
        for value in values.into_iter().filter(|v| !v.is_empty()) {
            counts.total += 1;
            if value.as_number().is_some() {
                counts.numeric += 1;
            }
            if parse_candidate(value).is_some() {
                counts.dates += 1;
            }
        }
        counts
    }

    /// Maps counts to a type: uniform families first, then the strict
    /// `Mixed` ratios, otherwise `Text`. No values at all is `Empty`.
    pub fn classify(&self, thresholds: &InferenceThresholds) -> ColumnType {
        if self.total == 0 {
            return ColumnType::Empty;
        }
        let total = self.total as f64;
        if self.numeric == self.total {
            ColumnType::Numeric
        } else if self.dates == self.total {
            ColumnType::Date
        } else if self.numeric as f64 > thresholds.mixed_numeric_ratio * total
            || self.dates as f64 > thresholds.mixed_date_ratio * total
        {
            ColumnType::Mixed
        } else {
            ColumnType::Text
        }
    }
}

/// Infers the type of one column from its current values.
///
/// A missing column reads as all-empty and infers as `Empty`.
pub fn infer_type(table: &Table, column: &str, thresholds: &InferenceThresholds) -> ColumnType {
    TypeCounts::from_values(table.column_values(column)).classify(thresholds)
}

/// Inferred type of every column, in column order.
pub fn infer_all(table: &Table, thresholds: &InferenceThresholds) -> Vec<(String, ColumnType)> {
    table
        .columns()
        .iter()
        .map(|c| (c.clone(), infer_type(table, c, thresholds)))
        .collect()
}

/// Per-column statistics shown next to the inferred type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnType,
    pub non_empty: usize,
    pub empty: usize,
    pub distinct: usize,
    pub samples: Vec<String>,
}

impl ColumnProfile {
    /// Share of empty cells, 0-100.
    pub fn empty_pct(&self) -> f64 {
        let count = self.non_empty + self.empty;
        if count == 0 {
            0.0
        } else {
            (self.empty as f64 / count as f64) * 100.0
        }
    }

    /// Distinct values over non-empty values, 0.0 for an empty column.
    pub fn uniqueness_ratio(&self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.distinct as f64 / self.non_empty as f64
        }
    }
}

/// Profiles one column. Distinct values and samples compare stringified
/// cells; samples keep first-seen order.
pub fn profile_column(
    table: &Table,
    column: &str,
    thresholds: &InferenceThresholds,
) -> ColumnProfile {
    let mut seen = HashSet::new();
    let mut samples = Vec::new();
    let mut empty = 0;

    for value in table.column_values(column) {
        if value.is_empty() {
            empty += 1;
            continue;
        }
        let text = value.as_text().into_owned();
        if samples.len() < SAMPLE_LIMIT && !seen.contains(&text) {
            samples.push(text.clone());
        }
        seen.insert(text);
    }

    ColumnProfile {
        name: column.to_owned(),
        kind: infer_type(table, column, thresholds),
        non_empty: table.len() - empty,
        empty,
        distinct: seen.len(),
        samples,
    }
}

/// Profiles every column, in column order.
pub fn profile_table(table: &Table, thresholds: &InferenceThresholds) -> Vec<ColumnProfile> {
    table
        .columns()
        .iter()
        .map(|c| profile_column(table, c, thresholds))
        .collect()
}
