//! Column type inference.
//!
//! Classifies each column from a bounded sample of leading rows. The sample
//! bound keeps inference O(sample) on million-row files; a column whose
//! distinguishing values appear only beyond the window can be misclassified,
//! which is the accepted tradeoff.

use crate::constants::TYPE_INFERENCE_SAMPLE_SIZE;
use crate::types::{ColumnKind, ColumnMetadata, DateFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// `YYYY-MM-DD`, optionally `THH:MM:SS`, `.mmm`, `Z`
static ISO_8601: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d{3})?Z?)?$").unwrap()
});

/// `M/D/YYYY` with one- or two-digit month and day
static US_SLASH_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());

/// Fraction of sampled values that must match for a kind to win
const KIND_RATIO: f64 = 0.8;

/// Fraction above which a losing kind still marks the column as mixed
const MIXED_RATIO: f64 = 0.2;

/// Parse a cell as a finite number. Shared with number filter evaluation so
/// inference and filtering never disagree on what counts as numeric.
pub fn parse_numeric(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn date_format_of(value: &str) -> Option<DateFormat> {
    if ISO_8601.is_match(value) {
        Some(DateFormat::Iso8601)
    } else if US_SLASH_DATE.is_match(value) {
        Some(DateFormat::UsSlashDate)
    } else {
        None
    }
}

fn is_boolean(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "1" | "0"
    )
}

/// Normalize a cell to the canonical `"true"`/`"false"` tokens, if possible.
/// Shared with boolean filter evaluation so the two never disagree.
pub fn normalize_boolean(value: &str) -> Option<&'static str> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some("true"),
        "false" | "no" | "0" => Some("false"),
        _ => None,
    }
}

/// Infer metadata for every column from the first
/// [`TYPE_INFERENCE_SAMPLE_SIZE`] rows.
pub fn infer_column_types(rows: &[Vec<String>], headers: &[String]) -> Vec<ColumnMetadata> {
    let sample = &rows[..rows.len().min(TYPE_INFERENCE_SAMPLE_SIZE)];

    headers
        .iter()
        .enumerate()
        .map(|(index, name)| infer_column(sample, index, name))
        .collect()
}

fn infer_column(sample: &[Vec<String>], index: usize, name: &str) -> ColumnMetadata {
    // Missing cells in short rows count as blank, not as values
    let values: Vec<&str> = sample
        .iter()
        .filter_map(|row| row.get(index).map(|s| s.trim()))
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        return ColumnMetadata::text(name);
    }

    let mut numeric_values: Vec<f64> = Vec::new();
    let mut date_count = 0usize;
    let mut boolean_count = 0usize;
    let mut date_format: Option<DateFormat> = None;

    for value in &values {
        if let Some(n) = parse_numeric(value) {
            numeric_values.push(n);
        }
        if let Some(format) = date_format_of(value) {
            date_count += 1;
            // First matching sample value decides the recorded format
            date_format.get_or_insert(format);
        }
        if is_boolean(value) {
            boolean_count += 1;
        }
    }

    let total = values.len() as f64;
    let numeric_ratio = numeric_values.len() as f64 / total;
    let date_ratio = date_count as f64 / total;
    let boolean_ratio = boolean_count as f64 / total;

    let mut metadata = ColumnMetadata::text(name);

    if numeric_ratio > KIND_RATIO {
        metadata.kind = ColumnKind::Number;
        metadata.min = numeric_values.iter().copied().reduce(f64::min);
        metadata.max = numeric_values.iter().copied().reduce(f64::max);
        metadata.nan_count = Some(values.len() - numeric_values.len());
    } else if date_ratio > KIND_RATIO {
        metadata.kind = ColumnKind::Date;
        metadata.date_format = date_format;
    } else if boolean_ratio > KIND_RATIO {
        metadata.kind = ColumnKind::Boolean;
    } else if numeric_ratio > MIXED_RATIO || date_ratio > MIXED_RATIO || boolean_ratio > MIXED_RATIO
    {
        metadata.kind = ColumnKind::Mixed;
    }

    let unique: HashSet<&str> = values.iter().copied().collect();
    metadata.unique_count = Some(unique.len());

    metadata
}
