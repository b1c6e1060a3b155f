//! Date detection and normalization.
//!
//! Values are tried against a fixed, ordered list of layouts and the first
//! layout producing a calendar date with a year strictly between 1900 and 2100
//! wins. Ambiguous strings such as `01/02/2023` therefore resolve by list
//! precedence (US month-first), never by locale.
//!
//! A layout only counts as matched when formatting the date back in that
//! layout reproduces the input exactly. Looser spellings (`1/6/2023`,
//! `Jan 5, 2023`) still parse, in a second pass, but carry no layout.

use super::inference::infer_type;
use crate::config::InferenceThresholds;
use crate::model::{Table, Value, parse_number};
use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};

const MIN_YEAR_EXCLUSIVE: i32 = 1900;
const MAX_YEAR_EXCLUSIVE: i32 = 2100;

/// Every layout the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateLayout {
    /// `yyyy-MM-dd`
    Iso,
    /// `MM/dd/yyyy`
    Us,
    /// `dd/MM/yyyy`
    European,
    /// `dd-MM-yyyy`
    Hyphenated,
    /// `MM-dd-yyyy`
    UsHyphenated,
    /// `dd.MM.yyyy`
    Dotted,
    /// `yyyy/MM/dd`
    YearSlash,
    /// `MMMM d, yyyy`
    Verbose,
    /// `d MMMM yyyy`
    DayMonthName,
}

/// Parse precedence. Reordering this changes which date ambiguous input resolves to.
pub const PARSE_ORDER: [DateLayout; 9] = [
    DateLayout::Iso,
    DateLayout::Us,
    DateLayout::European,
    DateLayout::Hyphenated,
    DateLayout::UsHyphenated,
    DateLayout::Dotted,
    DateLayout::YearSlash,
    DateLayout::Verbose,
    DateLayout::DayMonthName,
];

impl DateLayout {
    fn parse_pattern(self) -> &'static str {
        match self {
            Self::Iso => "%Y-%m-%d",
            Self::Us => "%m/%d/%Y",
            Self::European => "%d/%m/%Y",
            Self::Hyphenated => "%d-%m-%Y",
            Self::UsHyphenated => "%m-%d-%Y",
            Self::Dotted => "%d.%m.%Y",
            Self::YearSlash => "%Y/%m/%d",
            Self::Verbose => "%B %d, %Y",
            Self::DayMonthName => "%d %B %Y",
        }
    }

    fn format_pattern(self) -> &'static str {
        match self {
            Self::Verbose => "%B %-d, %Y",
            Self::DayMonthName => "%-d %B %Y",
            other => other.parse_pattern(),
        }
    }

    /// Human-readable pattern, as shown in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iso => "yyyy-MM-dd",
            Self::Us => "MM/dd/yyyy",
            Self::European => "dd/MM/yyyy",
            Self::Hyphenated => "dd-MM-yyyy",
            Self::UsHyphenated => "MM-dd-yyyy",
            Self::Dotted => "dd.MM.yyyy",
            Self::YearSlash => "yyyy/MM/dd",
            Self::Verbose => "MMMM d, yyyy",
            Self::DayMonthName => "d MMMM yyyy",
        }
    }
}

/// Layouts a column can be normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TargetLayout {
    #[default]
    Iso,
    Us,
    European,
    Hyphenated,
    Verbose,
}

impl TargetLayout {
    /// Every target, in the order a host should offer them.
    pub const ALL: [Self; 5] = [
        Self::Iso,
        Self::Us,
        Self::European,
        Self::Hyphenated,
        Self::Verbose,
    ];

    /// Layout used when rendering this target.
    pub fn layout(self) -> DateLayout {
        match self {
            Self::Iso => DateLayout::Iso,
            Self::Us => DateLayout::Us,
            Self::European => DateLayout::European,
            Self::Hyphenated => DateLayout::Hyphenated,
            Self::Verbose => DateLayout::Verbose,
        }
    }
}

/// A successfully parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDate {
    pub date: NaiveDate,
    /// Layout whose canonical rendering equals the input; `None` when the
    /// value only parsed leniently (unpadded digits, abbreviated month names)
    pub layout: Option<DateLayout>,
}

/// Probes a cell. Numbers and purely numeric strings are never dates.
pub fn parse_candidate(value: &Value) -> Option<NormalizedDate> {
    match value {
        Value::Text(s) => parse_date_str(s),
        Value::Number(_) | Value::Empty => None,
    }
}

fn parse_with(s: &str, layout: DateLayout) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, layout.parse_pattern())
        .ok()
        .filter(|d| d.year() > MIN_YEAR_EXCLUSIVE && d.year() < MAX_YEAR_EXCLUSIVE)
}

/// Parses trimmed text, preferring an exact layout match over a lenient one.
pub fn parse_date_str(raw: &str) -> Option<NormalizedDate> {
    let s = raw.trim();
    if s.is_empty() || parse_number(s).is_some() {
        return None;
    }
    let exact = PARSE_ORDER.iter().find_map(|&layout| {
        parse_with(s, layout)
            .filter(|&date| apply_format(date, layout) == s)
            .map(|date| NormalizedDate {
                date,
                layout: Some(layout),
            })
    });
    exact.or_else(|| {
        PARSE_ORDER
            .iter()
            .find_map(|&layout| parse_with(s, layout))
            .map(|date| NormalizedDate { date, layout: None })
    })
}

/// Renders `date` in the canonical form of `layout`.
pub fn apply_format(date: NaiveDate, layout: DateLayout) -> String {
    date.format(layout.format_pattern()).to_string()
}

/// Columns whose inferred type is `Date` or `Mixed`, in column order.
pub fn scan_for_date_columns(table: &Table, thresholds: &InferenceThresholds) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| infer_type(table, c, thresholds).is_date_candidate())
        .cloned()
        .collect()
}

/// Outcome of a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateNormalizationStats {
    /// Values rewritten to a different string
    pub changed: usize,
    /// Values that parsed (including those already in the target layout)
    pub parsed: usize,
    /// Non-empty values that did not parse and were left untouched
    pub unparsed: usize,
}

/// Reformats every parseable value of the selected columns. Values that do not
/// parse pass through unchanged.
pub fn apply_date_normalization(
    table: &Table,
    selected: &[String],
    target: TargetLayout,
) -> (Table, DateNormalizationStats) {
    let mut out = table.clone();
    let mut stats = DateNormalizationStats::default();
    let columns: Vec<&String> = selected.iter().filter(|c| table.has_column(c)).collect();

    for row in out.rows_mut() {
        for &column in &columns {
            let Some(value) = row.cells.get_mut(column.as_str()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match parse_candidate(value) {
                Some(parsed) => {
                    stats.parsed += 1;
                    let formatted = apply_format(parsed.date, target.layout());
                    if value.as_text() != formatted {
                        *value = Value::Text(formatted);
                        stats.changed += 1;
                    }
                }
                None => stats.unparsed += 1,
            }
        }
    }

    (out, stats)
}
