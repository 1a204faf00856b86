//! End-to-end pipeline workflows: worker events, limits, dataset build.

use plotstudio::data::ingest_bytes;
use plotstudio::types::RawTable;
use plotstudio::{
    ColumnKind, DataError, DateFormat, ParseEvent, ParseOptions, build_parsed_csv, spawn_parse,
};

fn init_tracing() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    });
}

#[test]
fn upload_to_dataset_happy_path() {
    init_tracing();

    let csv = b"date,city,revenue,active\n\
2024-01-01,NYC,100.5,yes\n\
2024-01-02,LA,200.25,no\n\
\n\
2024-01-03,NYC,x,true\n"
        .to_vec();

    let dataset = ingest_bytes(csv, "revenue.csv", &ParseOptions::default()).unwrap();

    assert_eq!(dataset.file_name, "revenue.csv");
    assert_eq!(dataset.row_count, 3);
    assert_eq!(dataset.column_count, 4);

    assert_eq!(dataset.columns[0].kind, ColumnKind::Date);
    assert_eq!(dataset.columns[0].date_format, Some(DateFormat::Iso8601));
    assert_eq!(dataset.columns[1].kind, ColumnKind::Text);
    assert_eq!(dataset.columns[3].kind, ColumnKind::Boolean);

    // 2 of 3 revenue cells parse: mixed, not number
    assert_eq!(dataset.columns[2].kind, ColumnKind::Mixed);

    assert!(
        dataset
            .modifications
            .iter()
            .any(|m| m.contains("empty row"))
    );
}

#[test]
fn worker_emits_ordered_progress_then_one_terminal_event() {
    let job = spawn_parse(
        b"a,b\n1,2\n3,4".to_vec(),
        "t.csv".to_string(),
        ParseOptions::default(),
    );

    let mut progress_values = Vec::new();
    let mut terminal_count = 0;
    while let Ok(event) = job.recv() {
        match event {
            ParseEvent::Progress { progress, .. } => {
                assert_eq!(terminal_count, 0, "progress after terminal event");
                progress_values.push(progress);
            }
            ParseEvent::Success { .. } | ParseEvent::Error { .. } => terminal_count += 1,
        }
        if terminal_count == 1 {
            break;
        }
    }

    assert_eq!(terminal_count, 1);
    assert!(progress_values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn limit_violations_surface_verbatim_messages() {
    let wide: String = (0..101).map(|i| format!("c{i}")).collect::<Vec<_>>().join(",");
    let job = spawn_parse(
        wide.into_bytes(),
        "wide.csv".to_string(),
        ParseOptions::default(),
    );
    let err = job.wait().unwrap_err();
    assert_eq!(err.to_string(), "CSV has 101 columns, maximum is 100");

    let options = ParseOptions {
        max_rows: 3,
        ..Default::default()
    };
    let job = spawn_parse(b"h\n1\n2\n3\n4".to_vec(), "tall.csv".to_string(), options);
    let err = job.wait().unwrap_err();
    assert_eq!(err.to_string(), "CSV has 4 rows, maximum is 3");
}

#[test]
fn oversized_file_is_rejected_before_parsing() {
    let options = ParseOptions {
        max_file_size: 8,
        ..Default::default()
    };
    let err = ingest_bytes(b"a,b\n1,2\n3,4".to_vec(), "big.csv", &options).unwrap_err();
    assert!(matches!(err, DataError::FileTooLarge { .. }));
    assert!(err.to_string().starts_with("File size exceeds maximum"));
}

#[test]
fn header_only_file_builds_an_empty_dataset() {
    let dataset = ingest_bytes(b"a,b,c\n".to_vec(), "t.csv", &ParseOptions::default()).unwrap();
    assert_eq!(dataset.row_count, 0);
    assert_eq!(dataset.column_count, 3);
    assert!(dataset.modifications.is_empty());
}

#[test]
fn empty_file_is_distinct_from_header_only() {
    let err = ingest_bytes(Vec::new(), "t.csv", &ParseOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "CSV file is empty");
}

#[test]
fn malformed_quotes_abort_the_pipeline() {
    let err = ingest_bytes(
        b"a,b\n\"oops,1\n2,3".to_vec(),
        "t.csv",
        &ParseOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, DataError::Syntax(_)));
}

#[test]
fn rebuild_of_built_dataset_is_a_noop() {
    let first = ingest_bytes(
        b" name ,,score\nAlice,x,1\n,,\nBob,y,2".to_vec(),
        "t.csv",
        &ParseOptions::default(),
    )
    .unwrap();
    assert!(!first.modifications.is_empty());

    let second = build_parsed_csv(RawTable {
        file_name: first.file_name.clone(),
        headers: first.headers.clone(),
        rows: first.rows.clone(),
    });

    assert!(second.modifications.is_empty());
    assert_eq!(second.signature, first.signature);
    assert_ne!(second.id, first.id);
}

#[test]
fn signature_is_stable_across_reupload_with_different_rows() {
    let monday = ingest_bytes(
        b"date,value\n2024-01-01,1".to_vec(),
        "monday.csv",
        &ParseOptions::default(),
    )
    .unwrap();
    let friday = ingest_bytes(
        b"date,value\n2024-01-05,9\n2024-01-06,10".to_vec(),
        "friday.csv",
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(monday.signature, friday.signature);
}

#[test]
fn preview_caps_at_the_configured_row_count() {
    let mut csv = String::from("n\n");
    for i in 0..600 {
        csv.push_str(&format!("{i}\n"));
    }
    let dataset = ingest_bytes(csv.into_bytes(), "t.csv", &ParseOptions::default()).unwrap();

    assert_eq!(dataset.row_count, 600);
    assert_eq!(dataset.preview().len(), plotstudio::constants::PREVIEW_ROWS);
}
