//! CSV and TSV text parsing.
//!
//! Converts raw delimited text into a grid of string cells. Every field is
//! preserved as text: no numeric or boolean coercion happens here, so leading
//! zeros, currency symbols and the like reach the type inferrer untouched.
//! Blank lines are kept as single-empty-cell records; dropping fully blank
//! rows is the cleaner's job. Rows are not forced rectangular.
//!
//! ## Limits
//!
//! Oversized or overshaped input fails fast before any heavier work:
//! - byte size above [`ParseOptions::max_file_size`] ([`DataError::FileTooLarge`])
//! - header wider than [`ParseOptions::max_columns`] ([`DataError::TooManyColumns`])
//! - more data rows than [`ParseOptions::max_rows`] ([`DataError::TooManyRows`])

use crate::constants::{MAX_COLUMNS, MAX_FILE_SIZE, MAX_ROWS, WARN_FILE_SIZE};
use crate::data::error::{DataError, DataResult};
use crate::types::RawTable;
use std::path::Path;
use tracing::{debug, warn};

/// Tunable parse limits and overrides.
///
/// Defaults come from [`crate::constants`]; tests and embedding callers can
/// tighten or loosen them per parse.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Byte-size ceiling checked before the file content is touched
    pub max_file_size: u64,
    /// Ceiling on data rows (the header row does not count)
    pub max_rows: usize,
    /// Ceiling on header columns
    pub max_columns: usize,
    /// Field delimiter; `None` auto-detects from content
    pub delimiter: Option<char>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_rows: MAX_ROWS,
            max_columns: MAX_COLUMNS,
            delimiter: None,
        }
    }
}

/// Reject a file by byte size before reading or parsing it.
pub fn check_file_size(size: u64, options: &ParseOptions) -> DataResult<()> {
    if size > options.max_file_size {
        return Err(DataError::FileTooLarge {
            size,
            max_mb: options.max_file_size / (1024 * 1024),
        });
    }
    if size > WARN_FILE_SIZE {
        warn!(size, "large file, parse may be slow");
    }
    Ok(())
}

/// Parse CSV/TSV content into a header row plus data rows.
///
/// Zero records is a terminal [`DataError::EmptyFile`]; a header-only file is
/// valid and yields zero data rows.
pub fn parse_csv_content(
    content: &str,
    file_name: &str,
    options: &ParseOptions,
) -> DataResult<RawTable> {
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(content));

    let mut records = parse_records(content, delimiter)?;

    if records.is_empty() {
        return Err(DataError::EmptyFile);
    }

    let headers = records.remove(0);
    let rows = records;

    if headers.len() > options.max_columns {
        return Err(DataError::TooManyColumns {
            columns: headers.len(),
            max_columns: options.max_columns,
        });
    }

    if rows.len() > options.max_rows {
        return Err(DataError::TooManyRows {
            rows: rows.len(),
            max_rows: options.max_rows,
        });
    }

    debug!(
        file_name,
        columns = headers.len(),
        rows = rows.len(),
        %delimiter,
        "parsed csv content"
    );

    Ok(RawTable {
        file_name: file_name.to_string(),
        headers,
        rows,
    })
}

/// Parse a CSV or TSV file from disk.
///
/// A `.tsv` extension forces a tab delimiter; otherwise the delimiter comes
/// from [`ParseOptions`] or content analysis.
pub fn parse_csv_file(path: &Path, options: &ParseOptions) -> DataResult<RawTable> {
    let metadata = std::fs::metadata(path)?;
    check_file_size(metadata.len(), options)?;

    let content = std::fs::read_to_string(path)?;

    let mut options = options.clone();
    if options.delimiter.is_none() && has_extension(path, "tsv") {
        options.delimiter = Some('\t');
    }

    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("data.csv")
        .to_string();

    parse_csv_content(&content, &file_name, &options)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Detect the most likely delimiter from the first few lines.
pub fn detect_delimiter(content: &str) -> char {
    let head: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    [',', ';', '\t', '|']
        .into_iter()
        .max_by_key(|&d| head.matches(d).count())
        .unwrap_or(',')
}

/// Split raw text into records of fields.
///
/// Quote handling follows the usual CSV rules: a field starting with `"` runs
/// until the closing quote and may contain the delimiter, doubled quotes and
/// line breaks. A quote still open at end of input is a fatal syntax error.
/// A quote appearing mid-way through an unquoted field is kept literally.
fn parse_records(text: &str, delimiter: char) -> DataResult<Vec<Vec<String>>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Distinguishes an empty quoted field ("") at end of record from no field
    let mut field_was_quoted = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        if c == '"' && field.is_empty() && !field_was_quoted {
            in_quotes = true;
            field_was_quoted = true;
        } else if c == delimiter {
            record.push(std::mem::take(&mut field));
            field_was_quoted = false;
        } else if c == '\n' || c == '\r' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            record.push(std::mem::take(&mut field));
            field_was_quoted = false;
            records.push(std::mem::take(&mut record));
        } else {
            field.push(c);
        }
    }

    if in_quotes {
        return Err(DataError::Syntax(
            "unterminated quoted field at end of input".to_string(),
        ));
    }

    // Pending data after the last newline; a trailing newline emits nothing.
    if !field.is_empty() || !record.is_empty() || field_was_quoted {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}
