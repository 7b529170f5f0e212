//! Natural merge sort with sub-linear scratch.
//!
//! Runs are detected and extended like in TimSort, but to a fixed minimum length, and kept on a
//! [`RunStack`] that re-checks every triple after each push. Merges go through a scratch of about
//! `sqrt(n)` elements without galloping mode. A merge whose shorter run does not fit is split
//! with block exchanges until the parts do.
//!
//! [`sort_in_place_by_less`] never allocates: it merges through a small stack array, or only with
//! block exchanges when elements are large.

use std::cmp::Ordering;
use std::mem::{self, MaybeUninit};

use crate::comparator::Comparator;
use crate::merge::MergeState;
use crate::primitives::insertion::binary_insertion_sort;
use crate::primitives::run::{extend_run, find_run, min_run_length, MIN_MERGE};
use crate::run_stack::{CollapsePolicy, Run, RunStack};
use crate::scratch::ScratchBuffer;

pub const NAME: &str = "natural_stable";

pub const IN_PLACE_NAME: &str = "natural_in_place_stable";

/// Lower bound for the scratch limit, below it block exchanges are more expensive than the memory
/// is worth.
const MIN_SCRATCH_LIMIT: usize = 64;

/// Stack scratch length of the in-place variant.
const STACK_SCRATCH_LEN: usize = 32;

/// Element size up to which the in-place variant uses a stack scratch at all.
const MAX_STACK_ELEM_SIZE: usize = 128;

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
        return;
    }

    let mut buf = ScratchBuffer::new();
    let limit = scratch_limit(v.len());
    natural_sort(v, MergeState::with_buffer(&mut buf, limit), &mut is_less);
}

/// Sorts `v` using `buf` as scratch, grown up to the same sub-linear limit as [`sort_by_less`].
pub fn sort_with_buffer<T, F>(v: &mut [T], mut is_less: F, buf: &mut ScratchBuffer<T>)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 || mem::size_of::<T>() == 0 {
        return;
    }

    let limit = scratch_limit(v.len());
    natural_sort(v, MergeState::with_buffer(buf, limit), &mut is_less);
}

#[inline]
pub fn sort_in_place<T>(v: &mut [T])
where
    T: Ord,
{
    sort_in_place_by_less(v, |a, b| a.lt(b));
}

#[inline]
pub fn sort_in_place_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_in_place_by_less(v, |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts `v` without heap allocation.
pub fn sort_in_place_by_less<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 || mem::size_of::<T>() == 0 {
        return;
    }

    // Two instantiations so that large types do not pay for an unused stack array.
    if mem::size_of::<T>() <= MAX_STACK_ELEM_SIZE {
        sort_with_stack_scratch::<T, F, STACK_SCRATCH_LEN>(v, &mut is_less);
    } else {
        sort_with_stack_scratch::<T, F, 0>(v, &mut is_less);
    }
}

#[inline(never)]
fn sort_with_stack_scratch<T, F, const N: usize>(v: &mut [T], is_less: &mut F)
where
    F: Comparator<T>,
{
    // SAFETY: an array of `MaybeUninit` does not require initialization.
    let mut slots: [MaybeUninit<T>; N] = unsafe { MaybeUninit::uninit().assume_init() };
    natural_sort(v, MergeState::with_slots(&mut slots), is_less);
}

/// Scratch limit for an input of `len` elements, `2^ceil(ilog2(len) / 2)`. That is between the square
/// root of `len` and about 1.5 times of it.
pub fn scratch_limit(len: usize) -> usize {
    let half_log = (len.max(1).ilog2() + 1) / 2;
    (1usize << half_log).max(MIN_SCRATCH_LIMIT)
}

#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn natural_sort<T, F>(v: &mut [T], state: MergeState<'_, T>, is_less: &mut F)
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
    let mut state = state.without_galloping();
    let mut runs = RunStack::new(CollapsePolicy::FullScan);

    let mut start = 0;
    while start < len {
        let run_len = extend_run(&mut v[start..], min_run, is_less);

        runs.push(Run {
            start,
            len: run_len,
        });
        start += run_len;

        runs.collapse(v, start == len, &mut state, is_less);
    }

    debug_assert!(runs.len() == 1 && runs.runs()[0] == Run { start: 0, len });

    crate::debug_verify_sorted(v, is_less);
}
