//! Chart and recents repositories across the upload workflow.

use plotstudio::{
    ChartConfig, ChartStore, ChartType, ParseOptions, RecentsStore, build_chart_series,
    build_initial_filters, apply_filters, ingest_bytes,
};

fn scatter_config(x: &str, y: &str) -> ChartConfig {
    ChartConfig {
        id: String::new(),
        chart_type: ChartType::Scatter,
        title: format!("{y} by {x}"),
        x_column: x.to_string(),
        y_columns: vec![y.to_string()],
        z_column: None,
        color_by_column: None,
        sampling_enabled: false,
        max_points: None,
        dataset_signature: String::new(),
    }
}

#[test]
fn saved_charts_reattach_to_a_reuploaded_dataset() {
    let charts = ChartStore::in_memory();

    let first = ingest_bytes(
        b"day,sales\n1,10\n2,20".to_vec(),
        "sales-jan.csv",
        &ParseOptions::default(),
    )
    .unwrap();
    charts.add(&first.signature, scatter_config("day", "sales"));

    // Same headers, different file name and rows
    let second = ingest_bytes(
        b"day,sales\n1,99\n2,98\n3,97".to_vec(),
        "sales-feb.csv",
        &ParseOptions::default(),
    )
    .unwrap();

    let reattached = charts.get(&second.signature);
    assert_eq!(reattached.len(), 1);

    // And the saved config still drives a series build on the new dataset
    let filters = build_initial_filters(&second);
    let visible = apply_filters(&second.rows, &second.headers, &filters);
    let series = build_chart_series(&second, &reattached[0].config, &visible);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].y, vec![99.0, 98.0, 97.0]);
}

#[test]
fn different_headers_do_not_see_each_others_charts() {
    let charts = ChartStore::in_memory();

    let a = ingest_bytes(
        b"x,y\n1,2".to_vec(),
        "a.csv",
        &ParseOptions::default(),
    )
    .unwrap();
    let b = ingest_bytes(
        b"x,z\n1,2".to_vec(),
        "b.csv",
        &ParseOptions::default(),
    )
    .unwrap();

    charts.add(&a.signature, scatter_config("x", "y"));
    assert!(charts.get(&b.signature).is_empty());
}

#[test]
fn recents_track_uploads_and_chart_counts() {
    let charts = ChartStore::in_memory();
    let recents = RecentsStore::in_memory();

    let dataset = ingest_bytes(
        b"x,y\n1,2".to_vec(),
        "data.csv",
        &ParseOptions::default(),
    )
    .unwrap();

    recents.add(dataset.metadata(charts.count(&dataset.signature)));
    assert_eq!(recents.list()[0].chart_count, 0);

    charts.add(&dataset.signature, scatter_config("x", "y"));
    recents.touch_chart_count(&dataset.signature, charts.count(&dataset.signature));

    let entry = &recents.list()[0];
    assert_eq!(entry.chart_count, 1);
    assert_eq!(entry.file_name, "data.csv");
    assert_eq!(entry.row_count, 1);
}

#[test]
fn reupload_moves_dataset_to_front_of_recents_without_duplicating() {
    let recents = RecentsStore::in_memory();

    let first = ingest_bytes(
        b"x,y\n1,2".to_vec(),
        "a.csv",
        &ParseOptions::default(),
    )
    .unwrap();
    let other = ingest_bytes(
        b"p,q\n1,2".to_vec(),
        "b.csv",
        &ParseOptions::default(),
    )
    .unwrap();

    recents.add(first.metadata(0));
    recents.add(other.metadata(0));
    assert_eq!(recents.list()[0].file_name, "b.csv");

    let reupload = ingest_bytes(
        b"x,y\n5,6\n7,8".to_vec(),
        "a-v2.csv",
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(reupload.signature, first.signature);

    recents.add(reupload.metadata(0));
    let list = recents.list();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].file_name, "a-v2.csv");
}

#[test]
fn chart_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charts.json");

    {
        let charts = ChartStore::at_path(&path);
        let spec = charts.add("sig-1", scatter_config("x", "y"));
        charts.update("sig-1", &spec.config.id, |c| c.title = "renamed".to_string());
    }

    let charts = ChartStore::at_path(&path);
    let list = charts.get("sig-1");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].config.title, "renamed");
    assert_eq!(list[0].config.dataset_signature, "sig-1");
}
