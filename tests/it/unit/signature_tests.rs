//! Signature identity contract.

use plotstudio::hash_headers;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn deterministic_across_calls() {
    let h = headers(&["name", "age", "city"]);
    assert_eq!(hash_headers(&h), hash_headers(&h));
}

#[test]
fn reversal_changes_signature() {
    let cases: &[&[&str]] = &[
        &["name", "age"],
        &["a", "b", "c"],
        &["x", "y", "z", "w"],
        &["first", "second", "third"],
    ];
    for case in cases {
        let forward = headers(case);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_ne!(
            hash_headers(&forward),
            hash_headers(&reversed),
            "{case:?}"
        );
    }
}

#[test]
fn content_changes_signature() {
    assert_ne!(
        hash_headers(&headers(&["name", "age"])),
        hash_headers(&headers(&["name", "city"]))
    );
    assert_ne!(
        hash_headers(&headers(&["name"])),
        hash_headers(&headers(&["name", "name"]))
    );
}
