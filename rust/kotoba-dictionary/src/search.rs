//! Bound searches over index-addressable sorted sequences.
//!
//! The dictionary stores two independently sorted sequences (the string table,
//! ordered by bytes, and the token array, ordered by POS index). Both are searched
//! through the same routines here; callers supply the sequence length and a
//! function extracting the ordering key at a given position.

use std::ops::Range;

/// Returns the first position in `0..len` for which `pred` is `false`, assuming
/// that `pred` is `true` for a (possibly empty) prefix of the sequence and `false`
/// for the rest.
#[inline]
pub fn partition_point<F>(len: usize, mut pred: F) -> usize
where
    F: FnMut(usize) -> bool,
{
    let mut lo = 0;
    let mut hi = len;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Returns the first position whose key is not less than `target`.
#[inline]
pub fn lower_bound<K, F>(len: usize, target: K, mut key_at: F) -> usize
where
    K: Ord,
    F: FnMut(usize) -> K,
{
    partition_point(len, |i| key_at(i) < target)
}

/// Returns the first position whose key is greater than `target`.
#[inline]
pub fn upper_bound<K, F>(len: usize, target: K, mut key_at: F) -> usize
where
    K: Ord,
    F: FnMut(usize) -> K,
{
    partition_point(len, |i| key_at(i) <= target)
}

/// Returns the range of positions whose key equals `target`. The range is empty
/// (and positioned where `target` would be inserted) when there is no such key.
pub fn equal_range<K, F>(len: usize, target: K, mut key_at: F) -> Range<usize>
where
    K: Ord,
    F: FnMut(usize) -> K,
{
    let start = partition_point(len, |i| key_at(i) < target);
    let end = start + partition_point(len - start, |i| key_at(start + i) <= target);
    start..end
}

/// Returns the position of `target`, if present.
#[inline]
pub fn find<K, F>(len: usize, target: K, mut key_at: F) -> Option<usize>
where
    K: Ord,
    F: FnMut(usize) -> K,
{
    let pos = partition_point(len, |i| key_at(i) < target);
    (pos < len && key_at(pos) == target).then_some(pos)
}
