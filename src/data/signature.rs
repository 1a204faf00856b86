//! Dataset identity.
//!
//! The signature is an order-sensitive hash of the header names and nothing
//! else. Saved charts and recents entries are keyed by it, so any re-upload
//! with identical headers reattaches to its configuration regardless of row
//! content. Not a security property; collisions merely misattach a chart
//! list.

use sha2::{Digest, Sha256};

/// Hex characters kept from the digest. 64 bits of signature is plenty for
/// distinguishing header sets in a local chart store.
const SIGNATURE_LEN: usize = 16;

/// Hash a header sequence into a stable signature string.
///
/// Pure function of the header names and their order; no dependence on
/// clock, locale or process state.
pub fn hash_headers(headers: &[String]) -> String {
    let joined = headers.join("|");

    let digest = Sha256::digest(joined.as_bytes());
    let mut out = String::with_capacity(SIGNATURE_LEN);
    for byte in digest.iter().take(SIGNATURE_LEN / 2) {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
