//! Cleaning properties exercised through the public dataset builder.

use plotstudio::types::RawTable;
use plotstudio::{ColumnKind, build_parsed_csv};

fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        file_name: "test.csv".to_string(),
        headers: headers.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

#[test]
fn headers_are_never_empty_after_build() {
    let awkward: &[&[&str]] = &[
        &["", "", ""],
        &["  ", "name", ""],
        &["\t", " a ", "b", "", "c"],
    ];
    for headers in awkward {
        let dataset = build_parsed_csv(raw(headers, &[]));
        assert!(dataset.headers.iter().all(|h| !h.is_empty()), "{headers:?}");
    }
}

#[test]
fn blank_header_positions_keep_their_own_index() {
    let dataset = build_parsed_csv(raw(&["  name  ", "", "age"], &[&["a", "b", "c"]]));

    assert_eq!(dataset.headers, vec!["name", "Column_2", "age"]);
    assert_eq!(dataset.modifications.len(), 1);
    assert!(dataset.modifications[0].contains("position 2"));
    assert!(dataset.modifications[0].contains("Column_2"));
}

#[test]
fn whitespace_only_rows_are_dropped_before_trimming() {
    // A cell of exactly "  " must count as empty however the trim/emptiness
    // steps are ordered
    let dataset = build_parsed_csv(raw(
        &["a", "b"],
        &[&["1", "2"], &["  ", "  "], &["", ""], &["3", "4"]],
    ));

    assert_eq!(dataset.row_count, 2);
    assert_eq!(dataset.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    let note = dataset
        .modifications
        .iter()
        .find(|m| m.contains("empty row"))
        .expect("row-removal note present");
    assert!(note.contains("2"));
}

#[test]
fn duplicate_headers_after_trim_are_preserved() {
    // Known limitation, deliberately not "fixed": both survive and the first
    // wins name-based lookup
    let dataset = build_parsed_csv(raw(&["Name", "name "], &[&["a", "b"]]));
    assert_eq!(dataset.headers, vec!["Name", "name"]);
    assert_eq!(dataset.column_index("name"), Some(1));
}

#[test]
fn mixed_and_number_columns_coexist() {
    let dataset = build_parsed_csv(raw(
        &["n", "m"],
        &[&["1", "1"], &["2", "x"], &["3", "2"], &["4", "y"]],
    ));
    assert_eq!(dataset.columns[0].kind, ColumnKind::Number);
    assert_eq!(dataset.columns[1].kind, ColumnKind::Mixed);
}
