//! Bounded-offset alignment distance.
//!
//! `sift3` is an approximate, linear-time string distance: it walks both
//! strings in lockstep and, on a mismatch, probes a small fixed window for
//! a resynchronization point instead of exploring the full edit lattice.
//! It does not compute the true minimum edit distance; the window trades
//! accuracy for O(n) cost, which is what a per-keystroke dictionary scan
//! needs.
//!
//! `normalized` divides the raw distance by the average of the two lengths,
//! yielding a value in `[0, 1]` comparable across word lengths. This is the
//! one normalization scheme used everywhere in the crate; the acceptance
//! threshold that goes with it lives in `Config::distance_threshold`.

/// Approximate mismatch count between two strings.
///
/// Walks both char sequences with independent offsets. On a mismatch both
/// offsets reset and a window of `max_offset` positions ahead in either
/// string is searched for a resync point (an extra character in one of the
/// two strings); if none is found the position counts as a substitution.
/// The result is `(len1 + len2) / 2 - lcs` where `lcs` counts the matched
/// positions.
///
/// Degenerate cases: both empty -> 0, one empty -> the other's length.
pub fn sift3(s1: &str, s2: &str, max_offset: usize) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let len1 = a.len();
    let len2 = b.len();
    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut c = 0usize;
    let mut offset1 = 0usize;
    let mut offset2 = 0usize;
    let mut lcs = 0usize;
    while c + offset1 < len1 && c + offset2 < len2 {
        if a[c + offset1] == b[c + offset2] {
            lcs += 1;
        } else {
            offset1 = 0;
            offset2 = 0;
            for i in 0..max_offset {
                if c + i < len1 && a[c + i] == b[c] {
                    offset1 = i;
                    break;
                }
                if c + i < len2 && a[c] == b[c + i] {
                    offset2 = i;
                    break;
                }
            }
        }
        c += 1;
    }
    // lcs never exceeds min(len1, len2), so this cannot underflow.
    (len1 + len2) / 2 - lcs
}

/// `sift3` normalized by the average of the two char lengths.
///
/// Returns a distance in `[0, 1]`: 0.0 for identical strings, approaching
/// 1.0 as nothing aligns. Two empty strings are identical (0.0).
pub fn normalized(s1: &str, s2: &str, max_offset: usize) -> f32 {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    if len1 == 0 && len2 == 0 {
        return 0.0;
    }
    let avg = (len1 + len2) as f32 / 2.0;
    sift3(s1, s2, max_offset) as f32 / avg
}
