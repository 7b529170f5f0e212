//! Run based merge sort with galloping merges.
//!
//! Natural runs are detected left to right and extended to a minimum length with binary insertion
//! sort. They are kept on a [`RunStack`] with the top four runs checked after each push, and merged
//! through a scratch of at most half the input length, so every merge is buffered.

use std::cmp::Ordering;
use std::mem;

use crate::comparator::Comparator;
use crate::merge::MergeState;
use crate::primitives::insertion::binary_insertion_sort;
use crate::primitives::run::{extend_run, find_run, min_run_length, MIN_MERGE};
use crate::run_stack::{CollapsePolicy, Run, RunStack};
use crate::scratch::ScratchBuffer;

pub const NAME: &str = "timsort_stable";

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_by_less(v, |a, b| a.lt(b));
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_by_less(v, |a, b| compare(a, b) == Ordering::Less);
}

#[inline]
pub fn sort_by_less<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 || mem::size_of::<T>() == 0 {
        // These inputs are always sorted, and zero-sized types have no meaningful order.
        return;
    }

    // Allocates lazily on the first merge, short inputs never do.
    let mut buf = ScratchBuffer::new();
    timsort(v, &mut buf, &mut is_less);
}

/// Sorts `v` using `buf` as scratch. `buf` is grown as needed and can be reused for the next call.
pub fn sort_with_buffer<T, F>(v: &mut [T], mut is_less: F, buf: &mut ScratchBuffer<T>)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 || mem::size_of::<T>() == 0 {
        return;
    }

    timsort(v, buf, &mut is_less);
}

#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn timsort<T, F>(v: &mut [T], buf: &mut ScratchBuffer<T>, is_less: &mut F)
where
    F: Comparator<T>,
{
    let len = v.len();

    if len < MIN_MERGE {
        let run_len = find_run(v, is_less);
        binary_insertion_sort(v, run_len, is_less);
        crate::debug_verify_sorted(v, is_less);
        return;
    }

    let min_run = min_run_length(len);
    // The shorter of two runs never exceeds half the input, so the limit is never hit.
    let mut state = MergeState::with_buffer(buf, len - len / 2);
    let mut runs = RunStack::new(CollapsePolicy::TopFour);

    let mut start = 0;
    while start < len {
        let run_len = extend_run(&mut v[start..], min_run, is_less);

        runs.push(Run {
            start,
            len: run_len,
        });
        start += run_len;

        // Merge some pairs of adjacent runs to satisfy the invariants, everything once the end of
        // the input is reached.
        runs.collapse(v, start == len, &mut state, is_less);
    }

    // Finally, exactly one run must remain in the stack.
    debug_assert!(runs.len() == 1 && runs.runs()[0] == Run { start: 0, len });

    crate::debug_verify_sorted(v, is_less);
}
