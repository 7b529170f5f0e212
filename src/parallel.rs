//! Fork/join wrapper around [`timsort`](crate::stable::timsort).
//!
//! The input is split in two halves which are sorted on separate rayon workers, each with its own
//! scratch. Once both are done, the halves are merged on the calling thread. Halves never overlap
//! and the comparison function is only shared by reference, so no locking is involved.

use std::cmp::Ordering;
use std::mem;

use crate::merge::{merge, MergeState};
use crate::scratch::ScratchBuffer;
use crate::stable::timsort;

pub const NAME: &str = "rayon_timsort_stable";

/// Sub-slices shorter than this are sorted on the current thread.
pub const PARALLEL_THRESHOLD: usize = 4096;

#[inline]
pub fn par_sort<T>(v: &mut [T])
where
    T: Ord + Send,
{
    par_sort_by_less(v, |a: &T, b: &T| a.lt(b));
}

#[inline]
pub fn par_sort_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    par_sort_by_less(v, |a: &T, b: &T| compare(a, b) == Ordering::Less);
}

/// Sorts `v` in parallel. Stable, produces the same result as [`timsort::sort_by_less`].
///
/// If `is_less` panics on any worker, the panic is propagated once both halves are done. `v` then
/// holds every element exactly once, in unspecified order.
pub fn par_sort_by_less<T, F>(v: &mut [T], is_less: F)
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    if v.len() < 2 || mem::size_of::<T>() == 0 {
        return;
    }

    par_merge_sort(v, &is_less);
}

fn par_merge_sort<T, F>(v: &mut [T], is_less: &F)
where
    T: Send,
    F: Fn(&T, &T) -> bool + Sync,
{
    let len = v.len();

    if len < PARALLEL_THRESHOLD {
        timsort::sort_by_less(v, is_less);
        return;
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        rayon::join(
            || par_merge_sort(left, is_less),
            || par_merge_sort(right, is_less),
        );
    }

    // The left half is the shorter one, so the limit always allows a buffered merge.
    let mut buf = ScratchBuffer::new();
    let mut state = MergeState::with_buffer(&mut buf, mid);
    merge(v, mid, &mut state, &mut |a: &T, b: &T| is_less(a, b));
}
