//! Core types for the plot studio data pipeline.
//!
//! This module defines the dataset entity and its metadata, the raw parse
//! payload exchanged with the parse worker, and the persisted chart
//! configuration types keyed by dataset signature.

use crate::constants::PREVIEW_ROWS;
use crate::data::DataError;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

// ============================================================================
// Column Metadata
// ============================================================================

/// Semantic kind assigned to a column by sampled-ratio inference
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Number,
    Date,
    Text,
    Boolean,
    Mixed,
}

impl Default for ColumnKind {
    fn default() -> Self {
        Self::Text
    }
}

/// Date layout recognized by the inferrer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "ISO_8601")]
    Iso8601,
    #[serde(rename = "US_SLASH_DATE")]
    UsSlashDate,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Per-column metadata computed once at dataset build time.
///
/// `min`/`max`/`nan_count` are present only for `Number` columns and
/// `date_format` only for `Date` columns. `unique_count` counts distinct
/// non-blank values within the inference sample, regardless of kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name (cleaned header)
    pub name: String,
    /// Inferred semantic kind
    pub kind: ColumnKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nan_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<DateFormat>,
}

impl ColumnMetadata {
    /// Metadata for a column with no usable sample: plain text, no stats
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            unique_count: None,
            min: None,
            max: None,
            nan_count: None,
            date_format: None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Number
    }
}

// ============================================================================
// Parse Payloads
// ============================================================================

/// Raw parse result: the header row split off from the data rows.
///
/// Rows are not guaranteed rectangular; consumers treat a missing cell as an
/// empty string and ignore indices past the cell count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Message emitted by the parse worker.
///
/// An ordered sequence of zero or more `Progress` events followed by exactly
/// one terminal event (`Success` or `Error`).
#[derive(Debug)]
pub enum ParseEvent {
    Progress { progress: u8, message: String },
    Success { data: RawTable },
    Error { error: DataError },
}

impl ParseEvent {
    /// Whether this event ends the parse attempt
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ParseEvent::Progress { .. })
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// A fully built, typed dataset. Immutable after construction: no method
/// mutates it, and edits require rebuilding through the dataset builder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParsedCsv {
    /// Unique id for this upload (fresh per build, not content-derived)
    pub id: String,
    pub file_name: String,
    /// Cleaned header names, never empty strings
    pub headers: Vec<String>,
    /// Cleaned rows: every cell trimmed, no fully-blank rows
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub column_count: usize,
    /// Metadata per header index, same length and order as `headers`
    pub columns: Vec<ColumnMetadata>,
    /// Order-sensitive hash of the header names; identity key for matching
    /// saved charts and recents across re-uploads
    pub signature: String,
    /// Epoch milliseconds at build time
    pub uploaded_at: u64,
    /// Human-readable notes for every automatic correction applied
    pub modifications: Vec<String>,
}

impl ParsedCsv {
    /// Index of a column by name, or `None` if the header is unknown.
    ///
    /// Headers are not deduplicated, so a name that appears twice resolves
    /// to its first position.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// The leading rows shown in the data preview
    pub fn preview(&self) -> &[Vec<String>] {
        let end = self.rows.len().min(PREVIEW_ROWS);
        &self.rows[..end]
    }

    /// Metadata record for the recents list
    pub fn metadata(&self, chart_count: usize) -> DatasetMetadata {
        DatasetMetadata {
            id: self.id.clone(),
            file_name: self.file_name.clone(),
            signature: self.signature.clone(),
            row_count: self.row_count,
            column_count: self.column_count,
            uploaded_at: self.uploaded_at,
            chart_count,
        }
    }
}

/// Lightweight dataset record persisted in the recents list.
/// Row data is never persisted, only this metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub id: String,
    pub file_name: String,
    pub signature: String,
    pub row_count: usize,
    pub column_count: usize,
    pub uploaded_at: u64,
    pub chart_count: usize,
}

// ============================================================================
// Chart Configuration
// ============================================================================

/// Chart families the series builder can produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Scatter,
    Line,
    Bar,
    Histogram,
}

/// User-editable chart configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Blank until first saved; the chart store assigns an id
    pub id: String,
    pub chart_type: ChartType,
    pub title: String,
    pub x_column: String,
    pub y_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by_column: Option<String>,
    pub sampling_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<usize>,
    /// Identity key: charts reattach to any dataset whose headers hash the same
    pub dataset_signature: String,
}

/// Persisted chart configuration, stored under its dataset signature
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(flatten)]
    pub config: ChartConfig,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Milliseconds since the Unix epoch.
/// A clock before the epoch only happens on a misconfigured host; treat it as 0.
pub(crate) fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
