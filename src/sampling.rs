//! Deterministic point sampling.
//!
//! Fixed-stride reduction of a row set for rendering performance. Distinct
//! from the inference sample: this one feeds charts, not typing.

/// Indices picked when reducing `len` items to at most `max_points`.
///
/// `step = len / max_points` (real-valued); index `i` of the output maps to
/// `floor(i * step)`. Pure function of the two lengths: same input, same
/// picks, first item always kept, indices strictly increasing.
pub fn sample_indices(len: usize, max_points: usize) -> Vec<usize> {
    if len <= max_points {
        return (0..len).collect();
    }

    let step = len as f64 / max_points as f64;
    (0..max_points).map(|i| (i as f64 * step) as usize).collect()
}

/// Reduce `rows` to at most `max_points` representative rows.
///
/// Returns the input unchanged when it already fits.
pub fn sample_rows(rows: &[Vec<String>], max_points: usize) -> Vec<Vec<String>> {
    if rows.len() <= max_points {
        return rows.to_vec();
    }

    sample_indices(rows.len(), max_points)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect()
}
