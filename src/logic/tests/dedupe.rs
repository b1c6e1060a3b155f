use super::{table, texts};
use crate::logic::dedupe::{KeepStrategy, KeySelector, resolve_duplicates, scan_duplicates};
use crate::model::{Row, RowId, Table, Value};
use std::collections::HashSet;

fn people() -> Table {
    table(
        &["id", "name", "city"],
        &[
            &["1", "Ann", "Oslo"],
            &["2", "Bob", "Rome"],
            &["1", "Ann", "Oslo"],
            &["3", "Cid", "Oslo"],
            &["2", "Bob", "Paris"],
            &["1", "Ann", "Oslo"],
        ],
    )
}

#[test]
fn test_scan_whole_row() {
    assert_eq!(scan_duplicates(&people(), &KeySelector::WholeRow), 2);
}

#[test]
fn test_scan_single_column() {
    assert_eq!(scan_duplicates(&people(), &KeySelector::Column("id".into())), 3);
    assert_eq!(scan_duplicates(&people(), &KeySelector::Column("city".into())), 3);
}

#[test]
fn test_whole_row_distinguishes_number_from_text() {
    let rows = vec![
        Row::new(RowId(0)).with("v", 1.0),
        Row::new(RowId(1)).with("v", "1"),
    ];
    let t = Table::from_rows(vec!["v".to_owned()], rows);
    assert_eq!(scan_duplicates(&t, &KeySelector::WholeRow), 0);
    // Single-column keys compare the stringified value
    assert_eq!(scan_duplicates(&t, &KeySelector::Column("v".into())), 1);
}

#[test]
fn test_missing_cells_match_empty() {
    let rows = vec![
        Row::new(RowId(0)).with("a", "x"),
        Row::new(RowId(1)).with("a", "x").with("b", Value::Empty),
    ];
    let t = Table::from_rows(vec!["a".to_owned(), "b".to_owned()], rows);
    assert_eq!(scan_duplicates(&t, &KeySelector::WholeRow), 1);
}

#[test]
fn test_keep_first() {
    let t = people();
    let key = KeySelector::Column("id".into());
    let (out, removed) = resolve_duplicates(&t, &key, KeepStrategy::First);

    assert_eq!(removed, 3);
    assert_eq!(texts(&out, "id"), vec!["1", "2", "3"]);
    assert_eq!(texts(&out, "city"), vec!["Oslo", "Rome", "Oslo"]);
    assert_eq!(out.len() + removed, t.len());
}

#[test]
fn test_keep_last_retains_last_occurrence_in_original_order() {
    let t = people();
    let key = KeySelector::Column("id".into());
    let (out, removed) = resolve_duplicates(&t, &key, KeepStrategy::Last);

    assert_eq!(removed, 3);
    // id 3 (row 4), id 2 (row 5), id 1 (row 6)
    assert_eq!(texts(&out, "id"), vec!["3", "2", "1"]);
    assert_eq!(texts(&out, "city"), vec!["Oslo", "Paris", "Oslo"]);
    let ids: Vec<RowId> = out.rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RowId(3), RowId(4), RowId(5)]);
}

#[test]
fn test_resolved_keys_are_unique() {
    let t = people();
    for selector in [
        KeySelector::WholeRow,
        KeySelector::Column("id".into()),
        KeySelector::Column("city".into()),
    ] {
        for strategy in [KeepStrategy::First, KeepStrategy::Last] {
            let duplicates = scan_duplicates(&t, &selector);
            let (out, removed) = resolve_duplicates(&t, &selector, strategy);
            assert_eq!(removed, duplicates);
            assert_eq!(out.len() + removed, t.len());
            assert_eq!(scan_duplicates(&out, &selector), 0);
        }
    }
}

#[test]
fn test_resolved_rows_keep_lookup_by_id() {
    let (out, _) = resolve_duplicates(&people(), &KeySelector::WholeRow, KeepStrategy::First);
    let ids: HashSet<RowId> = out.rows().iter().map(|r| r.id).collect();
    assert_eq!(ids.len(), out.len());
    assert!(out.row(RowId(4)).is_some());
    assert!(out.row(RowId(2)).is_none());
}
