//! Data core for the plot studio.
//!
//! Turns raw CSV bytes into a validated, typed, immutable dataset and the
//! derived artifacts downstream visualization consumes:
//!
//! - a stable content signature (header-only, order-sensitive) that keys
//!   saved charts and recents across re-uploads
//! - per-column metadata from sampled type inference
//! - default filter definitions and filter evaluation
//! - deterministically sampled, chart-ready series
//!
//! Parsing runs on a worker thread behind an ordered event channel; every
//! other component is a pure synchronous function over immutable data.
//! Presentation, chart rendering and UI state live in other crates.

pub mod charts;
pub mod constants;
pub mod data;
pub mod filters;
pub mod sampling;
pub mod stores;
pub mod types;

pub use charts::{Series, SeriesKind, build_chart_series, chart_color};
pub use data::{
    DataError, DataResult, ParseJob, ParseOptions, build_parsed_csv, hash_headers, ingest_bytes,
    parse_csv_content, parse_csv_file, spawn_parse,
};
pub use filters::{
    ActiveFilter, Filter, FilterSet, active_filters, apply_filters, build_initial_filters,
};
pub use sampling::{sample_indices, sample_rows};
pub use stores::{ChartStore, RecentsStore};
pub use types::{
    ChartConfig, ChartSpec, ChartType, ColumnKind, ColumnMetadata, DatasetMetadata, DateFormat,
    ParseEvent, ParsedCsv, RawTable,
};
