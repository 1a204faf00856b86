//! Dataset assembly.
//!
//! Orchestrates cleaning, type inference and signature hashing into one
//! immutable [`ParsedCsv`]. Building is idempotent: feeding a built dataset's
//! headers and rows back in yields zero new modifications and the same
//! signature.

use crate::data::cleaning::{clean_headers, remove_empty_rows, trim_cells};
use crate::data::inference::infer_column_types;
use crate::data::signature::hash_headers;
use crate::types::{ParsedCsv, RawTable, epoch_millis};
use tracing::debug;
use uuid::Uuid;

/// Build a complete dataset from a raw parse payload.
///
/// Steps, in order: clean headers (collecting notes), drop fully blank rows
/// (one note when any were dropped), trim surviving cells, infer column
/// types, hash the cleaned headers. The dataset id is freshly generated and
/// not content-derived; re-uploading the same file produces a new id but the
/// same signature.
pub fn build_parsed_csv(input: RawTable) -> ParsedCsv {
    let mut modifications = Vec::new();

    let cleaned = clean_headers(&input.headers);
    modifications.extend(cleaned.modifications);

    let non_empty = remove_empty_rows(input.rows);
    if non_empty.removed_count > 0 {
        modifications.push(format!("Removed {} empty row(s)", non_empty.removed_count));
    }

    let rows = trim_cells(non_empty.rows);

    let columns = infer_column_types(&rows, &cleaned.headers);
    let signature = hash_headers(&cleaned.headers);

    debug!(
        file_name = %input.file_name,
        rows = rows.len(),
        columns = cleaned.headers.len(),
        %signature,
        modifications = modifications.len(),
        "built dataset"
    );

    ParsedCsv {
        id: Uuid::new_v4().to_string(),
        file_name: input.file_name,
        row_count: rows.len(),
        column_count: cleaned.headers.len(),
        headers: cleaned.headers,
        rows,
        columns,
        signature,
        uploaded_at: epoch_millis(),
        modifications,
    }
}
