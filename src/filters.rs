//! Filtering.
//!
//! Filters are a kind-tagged sum type dispatched on the explicit tag, never
//! on inheritance-style indirection. Default filters are derived from column
//! metadata; a row is visible iff it passes every filter. "Active" is a
//! derived view: a filter whose current value diverges from its default,
//! recomputed on every change and never stored.

use crate::constants::{
    CATEGORY_FILTER_MAX_OPTIONS, CATEGORY_FILTER_MAX_UNIQUE, CATEGORY_FILTER_MIN_UNIQUE,
};
use crate::data::{normalize_boolean, parse_numeric};
use crate::types::{ColumnKind, ParsedCsv};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A single column filter.
///
/// Number filters keep `min <= value_min <= value_max <= max`: construction
/// starts at the full observed range and [`reset`](Filter::reset) returns
/// to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Filter {
    Number {
        column: String,
        /// Observed minimum at build time (the default lower bound)
        min: f64,
        /// Observed maximum at build time (the default upper bound)
        max: f64,
        value_min: f64,
        value_max: f64,
    },
    Date {
        column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        start: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
    Boolean {
        column: String,
        /// Subset of `{"true", "false"}`
        allowed: BTreeSet<String>,
    },
    Category {
        column: String,
        /// Most frequent observed values, first-encountered order on ties
        options: Vec<String>,
        selected: BTreeSet<String>,
    },
}

/// Chip-list record for a filter that diverges from its default
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub column: String,
    pub label: String,
    pub kind: String,
}

fn both_bool_tokens() -> BTreeSet<String> {
    BTreeSet::from(["true".to_string(), "false".to_string()])
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Number { column, .. }
            | Filter::Date { column, .. }
            | Filter::Boolean { column, .. }
            | Filter::Category { column, .. } => column,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Filter::Number { .. } => "number",
            Filter::Date { .. } => "date",
            Filter::Boolean { .. } => "boolean",
            Filter::Category { .. } => "category",
        }
    }

    /// Whether this filter currently diverges from its default/full range
    pub fn is_active(&self) -> bool {
        match self {
            Filter::Number {
                min,
                max,
                value_min,
                value_max,
                ..
            } => value_min != min || value_max != max,
            Filter::Date { start, end, .. } => start.is_some() || end.is_some(),
            Filter::Boolean { allowed, .. } => allowed.len() != 2,
            Filter::Category {
                options, selected, ..
            } => selected.len() != options.len(),
        }
    }

    /// Restore the default (full range / all selected / both allowed /
    /// unbounded) without removing the filter from its list.
    pub fn reset(&mut self) {
        match self {
            Filter::Number {
                min,
                max,
                value_min,
                value_max,
                ..
            } => {
                *value_min = *min;
                *value_max = *max;
            }
            Filter::Date { start, end, .. } => {
                *start = None;
                *end = None;
            }
            Filter::Boolean { allowed, .. } => {
                *allowed = both_bool_tokens();
            }
            Filter::Category {
                options, selected, ..
            } => {
                *selected = options.iter().cloned().collect();
            }
        }
    }

    /// Whether `cell` passes this filter.
    fn passes(&self, cell: &str) -> bool {
        match self {
            Filter::Number {
                value_min,
                value_max,
                ..
            } => match parse_numeric(cell) {
                Some(n) => n >= *value_min && n <= *value_max,
                None => false,
            },
            Filter::Boolean { allowed, .. } => match normalize_boolean(cell) {
                Some(token) => allowed.contains(token),
                None => false,
            },
            Filter::Category { selected, .. } => selected.contains(cell),
            // Lexicographic comparison: correct for zero-padded ISO dates
            // only; other formats are a known limitation.
            Filter::Date { start, end, .. } => {
                if cell.is_empty() {
                    return false;
                }
                if let Some(start) = start {
                    if cell < start.as_str() {
                        return false;
                    }
                }
                if let Some(end) = end {
                    if cell > end.as_str() {
                        return false;
                    }
                }
                true
            }
        }
    }

    fn chip_label(&self) -> String {
        match self {
            Filter::Number {
                column,
                value_min,
                value_max,
                ..
            } => format!("{column}: {value_min}\u{2013}{value_max}"),
            Filter::Category {
                column, selected, ..
            } => {
                if selected.len() <= 3 {
                    let listed: Vec<&str> = selected.iter().map(String::as_str).collect();
                    format!("{column}: {}", listed.join(", "))
                } else {
                    format!("{column}: {} selected", selected.len())
                }
            }
            Filter::Boolean { column, allowed } => {
                let listed: Vec<&str> = allowed.iter().map(String::as_str).collect();
                format!("{column}: {}", listed.join(", "))
            }
            Filter::Date { column, start, end } => {
                let mut parts = Vec::new();
                if let Some(start) = start {
                    parts.push(format!("from {start}"));
                }
                if let Some(end) = end {
                    parts.push(format!("to {end}"));
                }
                format!("{column}: {}", parts.join(" "))
            }
        }
    }
}

/// Most frequent non-blank values of a column, capped at `limit`.
/// Ties keep first-encountered order.
pub fn top_categories(rows: &[Vec<String>], column_index: usize, limit: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let Some(value) = row.get(column_index) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if !counts.contains_key(value.as_str()) {
            order.push(value);
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<&str> = order;
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.into_iter().take(limit).map(String::from).collect()
}

/// Derive the default filter list from a dataset's column metadata.
///
/// Text and mixed columns are filterable only within the cardinality band
/// `2..=100`; outside it they get no filter at all.
pub fn build_initial_filters(dataset: &ParsedCsv) -> Vec<Filter> {
    let mut filters = Vec::new();

    for (index, header) in dataset.headers.iter().enumerate() {
        let meta = &dataset.columns[index];

        match meta.kind {
            ColumnKind::Number => {
                if let (Some(min), Some(max)) = (meta.min, meta.max) {
                    filters.push(Filter::Number {
                        column: header.clone(),
                        min,
                        max,
                        value_min: min,
                        value_max: max,
                    });
                }
            }
            ColumnKind::Boolean => {
                filters.push(Filter::Boolean {
                    column: header.clone(),
                    allowed: both_bool_tokens(),
                });
            }
            ColumnKind::Date => {
                filters.push(Filter::Date {
                    column: header.clone(),
                    start: None,
                    end: None,
                });
            }
            ColumnKind::Text | ColumnKind::Mixed => {
                let unique = meta.unique_count.unwrap_or(0);
                if (CATEGORY_FILTER_MIN_UNIQUE..=CATEGORY_FILTER_MAX_UNIQUE).contains(&unique) {
                    let options =
                        top_categories(&dataset.rows, index, CATEGORY_FILTER_MAX_OPTIONS);
                    if options.len() >= CATEGORY_FILTER_MIN_UNIQUE {
                        filters.push(Filter::Category {
                            column: header.clone(),
                            selected: options.iter().cloned().collect(),
                            options,
                        });
                    }
                }
            }
        }
    }

    filters
}

/// Keep the rows that pass every filter.
///
/// A filter naming a column absent from `headers` is skipped and never
/// excludes rows; a missing cell in a short row counts as blank.
pub fn apply_filters(
    rows: &[Vec<String>],
    headers: &[String],
    filters: &[Filter],
) -> Vec<Vec<String>> {
    if filters.is_empty() {
        return rows.to_vec();
    }

    let resolved: Vec<(usize, &Filter)> = filters
        .iter()
        .filter_map(|filter| {
            headers
                .iter()
                .position(|h| h == filter.column())
                .map(|index| (index, filter))
        })
        .collect();

    rows.iter()
        .filter(|row| {
            resolved.iter().all(|(index, filter)| {
                let cell = row.get(*index).map(String::as_str).unwrap_or("");
                filter.passes(cell)
            })
        })
        .cloned()
        .collect()
}

/// Chip records for every filter diverging from its default
pub fn active_filters(filters: &[Filter]) -> Vec<ActiveFilter> {
    filters
        .iter()
        .filter(|f| f.is_active())
        .map(|f| ActiveFilter {
            column: f.column().to_string(),
            label: f.chip_label(),
            kind: f.kind_name().to_string(),
        })
        .collect()
}

/// An owned filter list with the mutation surface the filter panel needs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Defaults derived from the dataset's column metadata
    pub fn for_dataset(dataset: &ParsedCsv) -> Self {
        Self {
            filters: build_initial_filters(dataset),
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Mutate the filter for `column` in place. Returns false when no filter
    /// targets that column.
    pub fn update(&mut self, column: &str, edit: impl FnOnce(&mut Filter)) -> bool {
        match self.filters.iter_mut().find(|f| f.column() == column) {
            Some(filter) => {
                edit(filter);
                true
            }
            None => false,
        }
    }

    /// Reset one filter to its default rather than deleting it
    pub fn clear(&mut self, column: &str) -> bool {
        self.update(column, Filter::reset)
    }

    pub fn reset_all(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }

    pub fn active(&self) -> Vec<ActiveFilter> {
        active_filters(&self.filters)
    }

    pub fn apply(&self, rows: &[Vec<String>], headers: &[String]) -> Vec<Vec<String>> {
        apply_filters(rows, headers, &self.filters)
    }
}
