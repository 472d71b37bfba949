//! Index arithmetic shared by the flattening engine and the history ring

/// Wrap an index into `[0, len)`.
///
/// Works for negative indices, so walking a ring backward with `p - 1`
/// lands on `len - 1` after slot zero.
pub fn wrap_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0, "wrap_index requires a non-empty ring");
    let len = len as i64;
    (((index % len) + len) % len) as usize
}

/// Zero-initialized sample array.
pub fn zero_filled(len: usize) -> Vec<f64> {
    vec![0.0; len]
}
