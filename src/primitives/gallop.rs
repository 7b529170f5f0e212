//! Exponential searches over sorted slices.
//!
//! A gallop starts at one end of the slice, probes at distances 1, 2, 4, ... until it overshoots the
//! boundary it is looking for, then finishes with a binary search inside the last bracket. Finding a
//! boundary at distance `d` costs `O(log d)` comparisons, which is what makes merging presorted
//! data cheap.
//!
//! All four variants return the boundary as an index into `range`, in `0..=range.len()`.
//!
//! | variant         | starts at | elements before the boundary |
//! |-----------------|-----------|------------------------------|
//! | `forward_lower` | front     | `< value`                    |
//! | `forward_upper` | front     | `<= value`                   |
//! | `reverse_lower` | back      | `< value`                    |
//! | `reverse_upper` | back      | `<= value`                   |

use crate::comparator::Comparator;

/// Number of leading elements less than `value`.
pub fn gallop_forward_lower<T, F>(range: &[T], value: &T, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    gallop_forward(range, |candidate| is_less.greater(value, candidate))
}

/// Number of leading elements less than or equal to `value`.
pub fn gallop_forward_upper<T, F>(range: &[T], value: &T, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    gallop_forward(range, |candidate| is_less.greater_equal(value, candidate))
}

/// Index of the first element of the greater-or-equal suffix, searched from the back.
pub fn gallop_reverse_lower<T, F>(range: &[T], value: &T, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    gallop_reverse(range, |candidate| is_less.less_equal(value, candidate))
}

/// Index of the first element of the strictly greater suffix, searched from the back.
pub fn gallop_reverse_upper<T, F>(range: &[T], value: &T, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    gallop_reverse(range, |candidate| is_less.less(value, candidate))
}

/// `before` must hold for a prefix of `range` and fail for the rest. Returns the prefix length.
#[inline]
fn gallop_forward<T>(range: &[T], mut before: impl FnMut(&T) -> bool) -> usize {
    let len = range.len();

    if len == 0 || !before(&range[0]) {
        return 0;
    }

    // `before(range[anchor])` holds, the boundary lies in `anchor + 1..=upper`.
    let mut anchor: usize = 0;
    let mut step: usize = 1;
    let upper = loop {
        let probe = anchor.saturating_add(step);
        if probe >= len {
            break len;
        }
        if !before(&range[probe]) {
            break probe;
        }
        anchor = probe;
        step = step.saturating_mul(2);
    };

    let mut lo = anchor + 1;
    let mut hi = upper;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if before(&range[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    lo
}

/// `after` must fail for a prefix of `range` and hold for the rest. Returns the prefix length.
#[inline]
fn gallop_reverse<T>(range: &[T], mut after: impl FnMut(&T) -> bool) -> usize {
    let len = range.len();

    if len == 0 || !after(&range[len - 1]) {
        return len;
    }

    // `after(range[anchor])` holds, the boundary lies in `lower..=anchor`.
    let mut anchor = len - 1;
    let mut step: usize = 1;
    let lower = loop {
        if step > anchor {
            break 0;
        }
        let probe = anchor - step;
        if !after(&range[probe]) {
            break probe + 1;
        }
        anchor = probe;
        step = step.saturating_mul(2);
    };

    let mut lo = lower;
    let mut hi = anchor;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if after(&range[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}
