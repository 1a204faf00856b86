//! Sampler contract.

use plotstudio::{sample_indices, sample_rows};

fn rows(n: usize) -> Vec<Vec<String>> {
    (0..n).map(|i| vec![i.to_string()]).collect()
}

#[test]
fn output_length_is_min_of_len_and_cap() {
    for n in [1usize, 2, 3, 7, 12, 100] {
        for len in [0usize, 1, 5, 12, 250] {
            let sampled = sample_rows(&rows(len), n);
            assert_eq!(sampled.len(), len.min(n), "len={len} n={n}");
        }
    }
}

#[test]
fn input_returned_unchanged_when_cap_is_large_enough() {
    let input = rows(12);
    assert_eq!(sample_rows(&input, 12), input);
    assert_eq!(sample_rows(&input, 13), input);
}

#[test]
fn stride_example_from_twelve_to_three() {
    assert_eq!(sample_indices(12, 3), vec![0, 4, 8]);
}

#[test]
fn selection_is_pure_and_keeps_first_row() {
    let input = rows(1000);
    let a = sample_rows(&input, 37);
    let b = sample_rows(&input, 37);
    assert_eq!(a, b);
    assert_eq!(a[0], input[0]);
}
