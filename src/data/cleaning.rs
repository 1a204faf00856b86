//! Header and row normalization.
//!
//! Every correction is recorded as a human-readable modification note so the
//! UI can tell the user exactly what was fixed up. Applied in order: headers
//! first, then blank-row removal, then cell trimming.

/// Result of cleaning a header row
#[derive(Clone, Debug, PartialEq)]
pub struct CleanedHeaders {
    pub headers: Vec<String>,
    pub modifications: Vec<String>,
}

/// Trim headers and auto-name blank ones as `Column_{1-based index}`.
///
/// Positions are handled independently: blanks at positions 2 and 4 become
/// `Column_2` and `Column_4`. Non-empty headers that collide after trimming
/// are left alone.
pub fn clean_headers(headers: &[String]) -> CleanedHeaders {
    let mut modifications = Vec::new();
    let cleaned = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let trimmed = header.trim();
            if trimmed.is_empty() {
                let name = format!("Column_{}", index + 1);
                modifications.push(format!(
                    "Empty header at position {} renamed to \"{}\"",
                    index + 1,
                    name
                ));
                name
            } else {
                trimmed.to_string()
            }
        })
        .collect();

    CleanedHeaders {
        headers: cleaned,
        modifications,
    }
}

/// Result of dropping fully blank rows
#[derive(Clone, Debug, PartialEq)]
pub struct NonEmptyRows {
    pub rows: Vec<Vec<String>>,
    pub removed_count: usize,
}

/// Drop rows whose every cell trims to the empty string, preserving the
/// order of survivors.
pub fn remove_empty_rows(rows: Vec<Vec<String>>) -> NonEmptyRows {
    let total = rows.len();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();
    let removed_count = total - rows.len();

    NonEmptyRows {
        rows,
        removed_count,
    }
}

/// Trim whitespace from every cell.
pub fn trim_cells(rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(|cell| cell.trim().to_string()).collect())
        .collect()
}
