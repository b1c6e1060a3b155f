//! Row validation rules: duplicate IDs and malformed email addresses.

use crate::model::{Row, Table};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A single check that can be switched on and pointed at a column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleToggle {
    pub enabled: bool,
    pub column: String,
}

impl RuleToggle {
    pub fn on(column: impl Into<String>) -> Self {
        Self {
            enabled: true,
            column: column.into(),
        }
    }

    fn active_column(&self) -> Option<&str> {
        (self.enabled && !self.column.is_empty()).then_some(self.column.as_str())
    }
}

/// The two row checks, each toggled and targeted independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    pub unique_id: RuleToggle,
    pub email_format: RuleToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    DuplicateId,
    InvalidEmail,
}

/// A row that failed a check, with a copy of the row for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 1-based position in the full table
    pub row_number: usize,
    pub kind: IssueKind,
    pub reason: String,
    pub row: Row,
}

/// Single `@`, no whitespace, and at least one dot after the `@`.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_SHAPE.is_match(s)
}

/// Scans the whole table once, in order. Blank cells are not checked.
pub fn validate_rows(table: &Table, rules: &ValidationRules) -> Vec<ValidationIssue> {
    let id_column = rules.unique_id.active_column();
    let email_column = rules.email_format.active_column();
    if id_column.is_none() && email_column.is_none() {
        return Vec::new();
    }

    let mut seen_ids = HashSet::new();
    let mut issues = Vec::new();

    for (idx, row) in table.rows().iter().enumerate() {
        let row_number = idx + 1;

        if let Some(column) = id_column {
            let value = row.get(column);
            if !value.is_blank() && !seen_ids.insert(value.as_text().into_owned()) {
                issues.push(ValidationIssue {
                    row_number,
                    kind: IssueKind::DuplicateId,
                    reason: format!("Duplicate {column} '{value}'"),
                    row: row.clone(),
                });
            }
        }

        if let Some(column) = email_column {
            let value = row.get(column);
            if !value.is_blank() && !is_valid_email(value.as_text().trim()) {
                issues.push(ValidationIssue {
                    row_number,
                    kind: IssueKind::InvalidEmail,
                    reason: format!("Invalid email in {column}: '{value}'"),
                    row: row.clone(),
                });
            }
        }
    }

    issues
}
