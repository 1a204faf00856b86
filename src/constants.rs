//! Pipeline-wide constants.
//!
//! Centralizes ingestion limits and sampling sizes so the thresholds are
//! recognized options rather than magic numbers scattered through the
//! pipeline.

// ============================================================================
// Ingestion Limits
// ============================================================================

/// Maximum file size in bytes accepted by the parser (50MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// File size in bytes above which a slow-parse warning is logged (10MB)
pub const WARN_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of data rows in a dataset
pub const MAX_ROWS: usize = 1_000_000;

/// Row count above which interactive performance degrades
pub const RECOMMENDED_ROWS: usize = 100_000;

/// Maximum number of columns in a dataset
pub const MAX_COLUMNS: usize = 100;

// ============================================================================
// Sampling
// ============================================================================

/// Number of leading rows inspected when inferring column types.
/// Independent of total row count; inference never rescans a large file.
pub const TYPE_INFERENCE_SAMPLE_SIZE: usize = 1000;

/// Default cap on points handed to a chart when sampling is enabled
pub const CHART_SAMPLING_THRESHOLD: usize = 50_000;

/// Number of rows shown in the dataset preview
pub const PREVIEW_ROWS: usize = 500;

// ============================================================================
// Filters
// ============================================================================

/// Minimum distinct values for a text/mixed column to be filterable
pub const CATEGORY_FILTER_MIN_UNIQUE: usize = 2;

/// Maximum distinct values for a text/mixed column to be filterable
pub const CATEGORY_FILTER_MAX_UNIQUE: usize = 100;

/// Maximum options listed in a category filter
pub const CATEGORY_FILTER_MAX_OPTIONS: usize = 20;

// ============================================================================
// Recents
// ============================================================================

/// Maximum datasets remembered in the recents list
pub const MAX_RECENTS: usize = 10;
