//! Binary search over an ascending sub-range of a slice.
//!
//! Both helpers narrow `range` the same way. They differ only in what they
//! report: [`search_closest`] always yields an insertion point, while
//! [`search_exact`] tells a hit apart from a miss so callers can insert or
//! delete without searching twice.

use std::ops::Range;

/// Returns the first index in `range` whose element is `>= target`.
///
/// Every element in `range.start..pos` is `< target` and every element in
/// `pos..range.end` is `>= target`. Returns `range.end` if all are smaller.
pub fn search_closest<T: Ord>(slice: &[T], target: &T, range: Range<usize>) -> usize {
    let Range { start: mut lo, end: mut hi } = range;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if slice[mid] < *target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Looks up `target` in `range`.
///
/// Returns `Ok(index)` if an element equal to `target` exists, otherwise
/// `Err(index)` with the position where `target` would have to be inserted
/// to keep `range` sorted.
pub fn search_exact<T: Ord>(slice: &[T], target: &T, range: Range<usize>) -> Result<usize, usize> {
    let Range { start: mut lo, end: mut hi } = range;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match slice[mid].cmp(target) {
            std::cmp::Ordering::Less => lo = mid + 1,
            std::cmp::Ordering::Greater => hi = mid,
            std::cmp::Ordering::Equal => return Ok(mid),
        }
    }
    Err(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_respects_sub_range() {
        let v = [9, 1, 3, 5, 7, 0];
        assert_eq!(search_closest(&v, &4, 1..5), 3);
        assert_eq!(search_closest(&v, &0, 1..5), 1);
        assert_eq!(search_closest(&v, &8, 1..5), 5);
        assert_eq!(search_closest(&v, &5, 1..5), 3);
    }

    #[test]
    fn closest_on_empty_range_returns_start() {
        let v = [1, 2, 3];
        assert_eq!(search_closest(&v, &2, 2..2), 2);
    }

    #[test]
    fn exact_hit_and_miss() {
        let v = [2, 4, 6, 8];
        assert_eq!(search_exact(&v, &6, 0..4), Ok(2));
        assert_eq!(search_exact(&v, &5, 0..4), Err(2));
        assert_eq!(search_exact(&v, &1, 0..4), Err(0));
        assert_eq!(search_exact(&v, &9, 0..4), Err(4));
        // 8 is outside the searched range
        assert_eq!(search_exact(&v, &8, 0..3), Err(3));
    }
}
