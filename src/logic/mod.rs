pub mod dates;
pub mod dedupe;
pub mod inference;
pub mod query;
pub mod transforms;
pub mod validation;

pub use dates::{
    DateLayout, DateNormalizationStats, NormalizedDate, TargetLayout, apply_date_normalization,
    apply_format, parse_candidate, parse_date_str, scan_for_date_columns,
};
pub use dedupe::{KeepStrategy, KeySelector, resolve_duplicates, scan_duplicates};
pub use inference::{ColumnProfile, TypeCounts, infer_all, infer_type, profile_table};
pub use query::{PageView, SortDirection, SortSpec, ViewQuery, run_view};
pub use transforms::{
    FindReplace, ReplaceScope, SplitRequest, find_replace, remove_empty_rows, split_column,
    trim_whitespace,
};
pub use validation::{IssueKind, RuleToggle, ValidationIssue, ValidationRules, validate_rows};

#[cfg(test)]
mod tests;
