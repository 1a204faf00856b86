//! Chart series building.
//!
//! Turns a dataset, a chart configuration and the visible (already filtered)
//! rows into renderer-agnostic series. Heavy work (category splitting,
//! sampling, numeric coercion) happens here rather than in the render path.

use crate::constants::CHART_SAMPLING_THRESHOLD;
use crate::data::parse_numeric;
use crate::filters::top_categories;
use crate::sampling::sample_rows;
use crate::types::{ChartConfig, ChartType, ParsedCsv};
use serde::{Deserialize, Serialize};

/// Chart color palette, round-robin by series index
pub const CHART_COLORS: [&str; 12] = [
    "#00ff41", // neon green (primary)
    "#ff00ff", // magenta
    "#00ffff", // cyan
    "#ffff00", // yellow
    "#ff6600", // orange
    "#6600ff", // purple
    "#ff0066", // pink
    "#00ff99", // mint
    "#ff9900", // amber
    "#0099ff", // sky blue
    "#99ff00", // lime
    "#ff0099", // hot pink
];

/// Color of the overflow bucket when splitting by category
const OTHER_COLOR: &str = "#737373";

/// Maximum categories split into their own series
const MAX_COLOR_CATEGORIES: usize = 12;

/// Color for the series at `index`; `bright` drops the alpha suffix
pub fn chart_color(index: usize, bright: bool) -> String {
    let color = CHART_COLORS[index % CHART_COLORS.len()];
    if bright {
        color.to_string()
    } else {
        format!("{color}cc")
    }
}

/// How a series is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Points,
    Lines,
    Bars,
    Histogram,
}

/// One chart-ready series.
///
/// `x` holds raw cell text (dates and categories stay as-is); `y` holds the
/// parsed numeric values, pair-filtered with `x` so the two stay aligned.
/// Histogram series carry their sample values in `y` with an empty `x`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub color: String,
}

/// Build the series list for a chart.
///
/// Sampling is applied first when enabled and the visible rows exceed the
/// configured cap. Unknown or missing columns produce an empty list, never
/// a panic.
pub fn build_chart_series(
    dataset: &ParsedCsv,
    config: &ChartConfig,
    rows: &[Vec<String>],
) -> Vec<Series> {
    let sampled;
    let rows: &[Vec<String>] = if config.sampling_enabled {
        let cap = config.max_points.unwrap_or(CHART_SAMPLING_THRESHOLD);
        if rows.len() > cap {
            sampled = sample_rows(rows, cap);
            &sampled
        } else {
            rows
        }
    } else {
        rows
    };

    match config.chart_type {
        ChartType::Scatter => build_scatter(dataset, config, rows),
        ChartType::Line => build_per_y_column(dataset, config, rows, SeriesKind::Lines),
        ChartType::Bar => build_per_y_column(dataset, config, rows, SeriesKind::Bars),
        ChartType::Histogram => build_histogram(dataset, config, rows),
    }
}

fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// x/y pairs where y parses as a number
fn paired_points(rows: &[Vec<String>], x_index: usize, y_index: usize) -> (Vec<String>, Vec<f64>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for row in rows {
        if let Some(value) = parse_numeric(cell(row, y_index)) {
            x.push(cell(row, x_index).to_string());
            y.push(value);
        }
    }
    (x, y)
}

fn build_scatter(dataset: &ParsedCsv, config: &ChartConfig, rows: &[Vec<String>]) -> Vec<Series> {
    let Some(x_index) = dataset.column_index(&config.x_column) else {
        return Vec::new();
    };
    let Some(y_index) = config
        .y_columns
        .first()
        .and_then(|name| dataset.column_index(name))
    else {
        return Vec::new();
    };
    let y_name = config.y_columns[0].clone();

    let color_by = config
        .color_by_column
        .as_ref()
        .and_then(|name| dataset.column_index(name));

    // Categorical color-by splits into one series per top category plus an
    // overflow bucket; numeric color-by stays one series (the renderer maps
    // a gradient from the raw cells).
    if let Some(color_index) = color_by {
        let numeric_color = dataset.columns[color_index].is_numeric();
        if !numeric_color {
            let categories = top_categories(rows, color_index, MAX_COLOR_CATEGORIES);
            let mut series = Vec::new();

            for (i, category) in categories.iter().enumerate() {
                let subset: Vec<Vec<String>> = rows
                    .iter()
                    .filter(|row| cell(row, color_index) == category)
                    .cloned()
                    .collect();
                let (x, y) = paired_points(&subset, x_index, y_index);
                series.push(Series {
                    name: category.clone(),
                    kind: SeriesKind::Points,
                    x,
                    y,
                    color: chart_color(i, true),
                });
            }

            let other: Vec<Vec<String>> = rows
                .iter()
                .filter(|row| {
                    let value = cell(row, color_index);
                    !categories.iter().any(|c| c == value)
                })
                .cloned()
                .collect();
            if !other.is_empty() {
                let (x, y) = paired_points(&other, x_index, y_index);
                series.push(Series {
                    name: "Other".to_string(),
                    kind: SeriesKind::Points,
                    x,
                    y,
                    color: OTHER_COLOR.to_string(),
                });
            }

            return series;
        }
    }

    let (x, y) = paired_points(rows, x_index, y_index);
    vec![Series {
        name: y_name,
        kind: SeriesKind::Points,
        x,
        y,
        color: chart_color(0, false),
    }]
}

fn build_per_y_column(
    dataset: &ParsedCsv,
    config: &ChartConfig,
    rows: &[Vec<String>],
    kind: SeriesKind,
) -> Vec<Series> {
    let Some(x_index) = dataset.column_index(&config.x_column) else {
        return Vec::new();
    };

    config
        .y_columns
        .iter()
        .enumerate()
        .filter_map(|(i, y_column)| {
            let y_index = dataset.column_index(y_column)?;
            let (x, y) = paired_points(rows, x_index, y_index);
            Some(Series {
                name: y_column.clone(),
                kind,
                x,
                y,
                color: chart_color(i, true),
            })
        })
        .collect()
}

fn build_histogram(dataset: &ParsedCsv, config: &ChartConfig, rows: &[Vec<String>]) -> Vec<Series> {
    let Some(x_index) = dataset.column_index(&config.x_column) else {
        return Vec::new();
    };

    let values: Vec<f64> = rows
        .iter()
        .filter_map(|row| parse_numeric(cell(row, x_index)))
        .collect();

    vec![Series {
        name: config.x_column.clone(),
        kind: SeriesKind::Histogram,
        x: Vec::new(),
        y: values,
        color: chart_color(0, true),
    }]
}
