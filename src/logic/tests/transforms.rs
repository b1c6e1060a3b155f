use super::{table, texts};
use crate::logic::transforms::{
    FindReplace, ReplaceScope, SplitRequest, find_replace, remove_empty_rows, split_column,
    split_value, trim_whitespace,
};
use crate::model::{Row, RowId, Table, Value};

#[test]
fn test_trim_only_touches_text() {
    let rows = vec![
        Row::new(RowId(0)).with("name", "  Alice  ").with("age", 30.0),
        Row::new(RowId(1)).with("name", "Bob\t").with("age", " 31 "),
        Row::new(RowId(2)).with("name", "Cid").with("age", Value::Empty),
    ];
    let t = Table::from_rows(vec!["name".to_owned(), "age".to_owned()], rows);
    let (out, changed) = trim_whitespace(&t);

    assert_eq!(changed, 3);
    assert_eq!(texts(&out, "name"), vec!["Alice", "Bob", "Cid"]);
    assert_eq!(out.rows()[0].get("age"), &Value::Number(30.0));
    assert_eq!(out.rows()[1].get("age"), &Value::text("31"));
    assert_eq!(out.rows()[2].get("age"), &Value::Empty);
    // Input untouched
    assert_eq!(t.rows()[0].get("name"), &Value::text("  Alice  "));
}

#[test]
fn test_remove_empty_rows() {
    let mut t = table(
        &["a", "b"],
        &[&["1", "x"], &["", ""], &["", "y"], &["", ""]],
    );
    if let Some(row) = t.row_mut(RowId(3)) {
        row.set("a", Value::text("   "));
    }
    let (out, removed) = remove_empty_rows(&t);
    assert_eq!(removed, 2);
    assert_eq!(texts(&out, "b"), vec!["x", "y"]);
}

#[test]
fn test_split_value_head_and_rest() {
    assert_eq!(split_value("Jane Doe", " "), ("Jane", "Doe"));
    assert_eq!(split_value("Jane Middle Doe", " "), ("Jane", "Middle Doe"));
    assert_eq!(split_value("Cher", " "), ("Cher", ""));
    assert_eq!(split_value("a::b::c", "::"), ("a", "b::c"));
}

#[test]
fn test_split_column_appends_columns() {
    let t = table(
        &["name", "age"],
        &[&["Jane Doe", "30"], &["Jane Middle Doe", "41"], &["Cher", "77"], &["", "5"]],
    );
    let request = SplitRequest::new("name", " ", "first", "last");
    let (out, rows) = split_column(&t, &request).unwrap();

    assert_eq!(rows, 4);
    assert_eq!(out.columns(), ["name", "age", "first", "last"]);
    assert_eq!(texts(&out, "first"), vec!["Jane", "Jane", "Cher", ""]);
    assert_eq!(texts(&out, "last"), vec!["Doe", "Middle Doe", "", ""]);
    assert_eq!(texts(&out, "name"), texts(&t, "name"));
}

#[test]
fn test_split_into_existing_column_overwrites() {
    let t = table(&["full", "last"], &[&["Ann Lee", "old"]]);
    let request = SplitRequest::new("full", " ", "first", "last");
    let (out, _) = split_column(&t, &request).unwrap();
    assert_eq!(out.columns(), ["full", "last", "first"]);
    assert_eq!(texts(&out, "last"), vec!["Lee"]);
}

#[test]
fn test_split_rejects_bad_requests() {
    let t = table(&["name"], &[&["Jane Doe"]]);
    assert!(split_column(&t, &SplitRequest::new("", " ", "a", "b")).is_none());
    assert!(split_column(&t, &SplitRequest::new("name", "", "a", "b")).is_none());
    assert!(split_column(&t, &SplitRequest::new("missing", " ", "a", "b")).is_none());
    assert!(split_column(&t, &SplitRequest::new("name", " ", "", "b")).is_none());
    assert!(split_column(&t, &SplitRequest::new("name", " ", "a", "a")).is_none());
}

#[test]
fn test_find_replace_all_columns_exact_match() {
    let t = table(
        &["a", "b", "c"],
        &[
            &["N/A", "x", "N/A"],
            &["N/A!", "N/A", "y"],
            &["n/a", "z", "N/A or so"],
        ],
    );
    let request = FindReplace::new("N/A", "", ReplaceScope::AllColumns);
    let (out, changed) = find_replace(&t, &request).unwrap();

    assert_eq!(changed, 3);
    assert_eq!(texts(&out, "a"), vec!["", "N/A!", "n/a"]);
    assert_eq!(texts(&out, "b"), vec!["x", "", "z"]);
    assert_eq!(texts(&out, "c"), vec!["", "y", "N/A or so"]);
}

#[test]
fn test_find_replace_single_column() {
    let t = table(&["a", "b"], &[&["x", "x"], &["y", "x"]]);
    let request = FindReplace::new("x", "X", ReplaceScope::Column("b".into()));
    let (out, changed) = find_replace(&t, &request).unwrap();
    assert_eq!(changed, 2);
    assert_eq!(texts(&out, "a"), vec!["x", "y"]);
    assert_eq!(texts(&out, "b"), vec!["X", "X"]);
}

#[test]
fn test_find_replace_matches_stringified_numbers() {
    let rows = vec![Row::new(RowId(0)).with("n", 7.0)];
    let t = Table::from_rows(vec!["n".to_owned()], rows);
    let (out, changed) =
        find_replace(&t, &FindReplace::new("7", "seven", ReplaceScope::AllColumns)).unwrap();
    assert_eq!(changed, 1);
    assert_eq!(texts(&out, "n"), vec!["seven"]);
}

#[test]
fn test_find_replace_empty_find_is_rejected() {
    let t = table(&["a"], &[&["x"]]);
    assert!(find_replace(&t, &FindReplace::new("", "y", ReplaceScope::AllColumns)).is_none());
    assert!(
        find_replace(&t, &FindReplace::new("x", "y", ReplaceScope::Column("zz".into()))).is_none()
    );
}
