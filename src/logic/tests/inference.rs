use super::{column, table};
use crate::config::InferenceThresholds;
use crate::logic::inference::{TypeCounts, infer_type, profile_table};
use crate::model::{ColumnType, Table, Value};

fn infer(values: &[&str]) -> ColumnType {
    infer_type(&column("c", values), "c", &InferenceThresholds::default())
}

fn repeated(value: &'static str, n: usize) -> Vec<&'static str> {
    std::iter::repeat_n(value, n).collect()
}

#[test]
fn test_all_empty_is_empty() {
    assert_eq!(infer(&["", "", ""]), ColumnType::Empty);
    assert_eq!(
        infer_type(&Table::default(), "missing", &InferenceThresholds::default()),
        ColumnType::Empty
    );
}

#[test]
fn test_uniform_columns() {
    assert_eq!(infer(&["1", "2.5", "-3", ""]), ColumnType::Numeric);
    assert_eq!(
        infer(&["2023-01-05", "01/06/2023", "March 3, 2021"]),
        ColumnType::Date
    );
    assert_eq!(infer(&["apple", "pear"]), ColumnType::Text);
}

#[test]
fn test_two_of_three_dates_is_text() {
    // 2 > 0.8 * 3 is false, so the 80% cutoff is not reached
    assert_eq!(
        infer(&["2023-01-05", "01/06/2023", "not a date"]),
        ColumnType::Text
    );
}

#[test]
fn test_threshold_cutoffs() {
    struct Case {
        numeric: usize,
        dates: usize,
        text: usize,
        expected: ColumnType,
    }

    let cases = [
        // 10 > 9.9
        Case { numeric: 10, dates: 0, text: 1, expected: ColumnType::Mixed },
        // 9 > 9.0 is false
        Case { numeric: 9, dates: 0, text: 1, expected: ColumnType::Text },
        // 19 > 18.0
        Case { numeric: 19, dates: 0, text: 1, expected: ColumnType::Mixed },
        // 9 > 8.0
        Case { numeric: 0, dates: 9, text: 1, expected: ColumnType::Mixed },
        // 4 > 4.0 is false
        Case { numeric: 0, dates: 4, text: 1, expected: ColumnType::Text },
        // 5 > 4.8
        Case { numeric: 0, dates: 5, text: 1, expected: ColumnType::Mixed },
        // neither family dominates
        Case { numeric: 5, dates: 4, text: 1, expected: ColumnType::Text },
    ];

    for case in cases {
        let mut values = repeated("42", case.numeric);
        values.extend(repeated("2023-01-05", case.dates));
        values.extend(repeated("hello", case.text));
        assert_eq!(
            infer(&values),
            case.expected,
            "numeric={} dates={} text={}",
            case.numeric,
            case.dates,
            case.text
        );
    }
}

#[test]
fn test_thresholds_are_tunable() {
    let mut values = repeated("2023-01-05", 2);
    values.push("nope");
    let loose = InferenceThresholds {
        mixed_numeric_ratio: 0.9,
        mixed_date_ratio: 0.5,
    };
    assert_eq!(infer_type(&column("c", &values), "c", &loose), ColumnType::Mixed);
}

#[test]
fn test_numbers_are_not_dates() {
    let counts = TypeCounts::from_values(&[Value::Number(20230105.0), Value::text("20230105")]);
    assert_eq!(counts.total, 2);
    assert_eq!(counts.numeric, 2);
    assert_eq!(counts.dates, 0);
}

#[test]
fn test_inference_is_idempotent() {
    let t = column("c", &["1", "x", "2023-01-05"]);
    let thresholds = InferenceThresholds::default();
    let first = infer_type(&t, "c", &thresholds);
    assert_eq!(infer_type(&t, "c", &thresholds), first);
}

#[test]
fn test_profile_counts_and_samples() {
    let t = table(
        &["id", "city"],
        &[
            &["1", "Oslo"],
            &["2", ""],
            &["3", "Oslo"],
            &["4", "Rome"],
        ],
    );
    let profiles = profile_table(&t, &InferenceThresholds::default());
    assert_eq!(profiles.len(), 2);

    let city = profiles.iter().find(|p| p.name == "city").unwrap();
    assert_eq!(city.kind, ColumnType::Text);
    assert_eq!(city.non_empty, 3);
    assert_eq!(city.empty, 1);
    assert_eq!(city.distinct, 2);
    assert_eq!(city.samples, vec!["Oslo", "Rome"]);
    assert!((city.empty_pct() - 25.0).abs() < f64::EPSILON);

    let id = profiles.iter().find(|p| p.name == "id").unwrap();
    assert_eq!(id.kind, ColumnType::Numeric);
    assert!((id.uniqueness_ratio() - 1.0).abs() < f64::EPSILON);
}
