//! Merging of two adjacent sorted runs.
//!
//! [`merge`] first trims the elements that are already in their final position. What remains is
//! either merged through the scratch, when the shorter run fits into it, or split with a block
//! exchange into two independent smaller merges.
//!
//! The buffered merge copies the shorter run out and merges into the hole it left, front to back
//! if the left run is shorter, back to front otherwise. That way no unread element is ever
//! overwritten. While merging it counts how often one side wins in a row. Once a side won
//! `min_gallop` times the merge switches to galloping, where whole blocks of winners are located
//! with an exponential search and moved at once.

use std::mem::{self, MaybeUninit};
use std::ptr;
use std::slice;

use crate::comparator::Comparator;
use crate::primitives::gallop::{
    gallop_forward_lower, gallop_forward_upper, gallop_reverse_lower, gallop_reverse_upper,
};
use crate::scratch::{Scratch, ScratchBuffer};

/// Initial value of the galloping threshold.
pub const MIN_GALLOP: usize = 7;

/// State shared by all merges of one sort call.
pub struct MergeState<'a, T> {
    scratch: Scratch<'a, T>,
    min_gallop: usize,
    galloping: bool,
}

impl<'a, T> MergeState<'a, T> {
    /// Merge through `buf`, growing it on demand. Runs longer than `limit` are never copied out,
    /// such merges are decomposed with block exchanges instead.
    pub fn with_buffer(buf: &'a mut ScratchBuffer<T>, limit: usize) -> Self {
        Self::new(Scratch::Growable { buf, limit })
    }

    /// Merge through a fixed number of slots, for example a stack array.
    pub fn with_slots(slots: &'a mut [MaybeUninit<T>]) -> Self {
        Self::new(Scratch::Fixed(slots))
    }

    fn new(scratch: Scratch<'a, T>) -> Self {
        Self {
            scratch,
            min_gallop: MIN_GALLOP,
            galloping: true,
        }
    }

    /// Disables galloping mode. Buffered merges then compare one pair per moved element. Trimming
    /// still uses exponential searches.
    pub fn without_galloping(mut self) -> Self {
        self.galloping = false;
        self
    }

    /// Current number of consecutive wins that switches a merge into galloping mode.
    pub fn min_gallop(&self) -> usize {
        self.min_gallop
    }

    /// Largest run length that is merged through the scratch.
    pub fn scratch_limit(&self) -> usize {
        self.scratch.limit()
    }
}

/// Merges the non-descending runs `v[..mid]` and `v[mid..]`, so that `v` is sorted.
///
/// Stable: of two equal elements the one from the left run ends up first. If `is_less` panics, `v`
/// still contains every element exactly once, in unspecified order.
pub fn merge<T, F>(v: &mut [T], mid: usize, state: &mut MergeState<'_, T>, is_less: &mut F)
where
    F: Comparator<T>,
{
    if mem::size_of::<T>() == 0 {
        return;
    }

    let mut v = v;
    let mut mid = mid;

    loop {
        let len = v.len();
        if mid == 0 || mid >= len {
            return;
        }

        // Leading elements of the left run that are not greater than the first element of the
        // right run are already in place, same for the mirrored case at the end.
        let start = gallop_forward_upper(&v[..mid], &v[mid], is_less);
        if start == mid {
            return;
        }
        let end = mid + gallop_reverse_lower(&v[mid..], &v[mid - 1], is_less);
        if end == mid {
            return;
        }

        let trimmed = mem::take(&mut v);
        v = &mut trimmed[start..end];
        mid -= start;

        let len = v.len();
        let shorter = mid.min(len - mid);

        if shorter <= state.scratch.limit() {
            let buf = state.scratch.reserve(shorter);

            // SAFETY: both runs are non-empty, `buf` has room for the shorter one and is separate
            // from `v`. `T` is not a zero-sized type.
            unsafe {
                if mid <= len - mid {
                    merge_lo(v, mid, buf, state.galloping, &mut state.min_gallop, is_less);
                } else {
                    merge_hi(v, mid, buf, state.galloping, &mut state.min_gallop, is_less);
                }
            }
            return;
        }

        let k = rotation_len(v, mid, is_less);
        if k == 0 {
            // Only reachable with an inconsistent `is_less`. Nothing left that could make progress.
            return;
        }
        swap_blocks(v, mid - k, mid, k);

        // `v[..mid]` now merges `v[..mid - k]` with `v[mid - k..mid]`, `v[mid..]` merges
        // `v[mid..mid + k]` with `v[mid + k..]`, and every element of the first part belongs before
        // every element of the second. Recurse into the smaller part, loop on the larger one, so
        // that the recursion depth stays logarithmic.
        let rest = mem::take(&mut v);
        let (lo, hi) = rest.split_at_mut(mid);
        if lo.len() <= hi.len() {
            merge(lo, mid - k, state, is_less);
            v = hi;
            mid = k;
        } else {
            merge(hi, k, state, is_less);
            v = lo;
            mid -= k;
        }
    }
}

/// Number of elements to exchange between the end of the left run and the start of the right run.
///
/// Returns the largest `k` such that `v[mid + k - 1] < v[mid - k]`, found with a binary search. After
/// exchanging `v[mid - k..mid]` with `v[mid..mid + k]` no element of `v[..mid]` is greater than an
/// element of `v[mid..]`, and equal elements from the left run stay in front.
pub fn rotation_len<T, F>(v: &[T], mid: usize, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    let mut lo = 0;
    let mut hi = mid.min(v.len() - mid);

    while lo < hi {
        let k = lo + (hi - lo + 1) / 2;
        if is_less.greater(&v[mid - k], &v[mid + k - 1]) {
            lo = k;
        } else {
            hi = k - 1;
        }
    }

    lo
}

/// Exchanges the blocks `v[a..a + len]` and `v[b..b + len]` element by element.
///
/// Panics if the blocks overlap or are out of bounds.
pub fn swap_blocks<T>(v: &mut [T], a: usize, b: usize, len: usize) {
    assert!(a + len <= b);

    let (front, back) = v.split_at_mut(b);
    front[a..a + len].swap_with_slice(&mut back[..len]);
}

/// Merges with the left run copied into `buf`, filling `v` front to back.
///
/// # Safety
///
/// `0 < mid < v.len()`, `buf` must be valid for `mid` writes and not overlap `v`. `T` must not be a
/// zero-sized type.
unsafe fn merge_lo<T, F>(
    v: &mut [T],
    mid: usize,
    buf: *mut T,
    galloping: bool,
    min_gallop: &mut usize,
    is_less: &mut F,
) where
    F: Comparator<T>,
{
    let len = v.len();
    let v_ptr = v.as_mut_ptr();
    let v_end = v_ptr.add(len);

    ptr::copy_nonoverlapping(v_ptr, buf, mid);

    // `hole.start..hole.end` is the unmerged rest of the left run, `hole.dest` the next output slot.
    // Invariant: `hole.dest + (hole.end - hole.start) == right`.
    let mut hole = MergeHole {
        start: buf,
        end: buf.add(mid),
        dest: v_ptr,
    };
    let mut right = v_ptr.add(mid);

    'merge: loop {
        let mut left_wins = 0usize;
        let mut right_wins = 0usize;

        // One pair at a time.
        loop {
            if hole.start == hole.end || right == v_end {
                break 'merge;
            }

            // If equal, prefer the left run to maintain stability.
            if is_less.less(&*right, &*hole.start) {
                ptr::copy_nonoverlapping(right, hole.dest, 1);
                right = right.add(1);
                right_wins += 1;
                left_wins = 0;
            } else {
                ptr::copy_nonoverlapping(hole.start, hole.dest, 1);
                hole.start = hole.start.add(1);
                left_wins += 1;
                right_wins = 0;
            }
            hole.dest = hole.dest.add(1);

            if galloping && (left_wins >= *min_gallop || right_wins >= *min_gallop) {
                break;
            }
        }

        // Galloping.
        loop {
            if hole.start == hole.end || right == v_end {
                break 'merge;
            }

            let left_rest = slice::from_raw_parts(hole.start, distance(hole.start, hole.end));
            let left_count = gallop_forward_upper(left_rest, &*right, is_less);
            ptr::copy_nonoverlapping(hole.start, hole.dest, left_count);
            hole.start = hole.start.add(left_count);
            hole.dest = hole.dest.add(left_count);
            if hole.start == hole.end {
                break 'merge;
            }

            ptr::copy_nonoverlapping(right, hole.dest, 1);
            right = right.add(1);
            hole.dest = hole.dest.add(1);
            if right == v_end {
                break 'merge;
            }

            let right_rest = slice::from_raw_parts(right, distance(right, v_end));
            let right_count = gallop_forward_lower(right_rest, &*hole.start, is_less);
            // May overlap, the destination trails `right` by the rest of the left run.
            ptr::copy(right, hole.dest, right_count);
            right = right.add(right_count);
            hole.dest = hole.dest.add(right_count);
            if right == v_end {
                break 'merge;
            }

            ptr::copy_nonoverlapping(hole.start, hole.dest, 1);
            hole.start = hole.start.add(1);
            hole.dest = hole.dest.add(1);

            if left_count < MIN_GALLOP && right_count < MIN_GALLOP {
                *min_gallop = min_gallop.saturating_add(2);
                break;
            }
            *min_gallop = min_gallop.saturating_sub(1).max(1);
        }
    }
    // `hole` gets dropped here and moves what is left of the left run into place.
}

/// Merges with the right run copied into `buf`, filling `v` back to front.
///
/// # Safety
///
/// `0 < mid < v.len()`, `buf` must be valid for `v.len() - mid` writes and not overlap `v`. `T` must
/// not be a zero-sized type.
unsafe fn merge_hi<T, F>(
    v: &mut [T],
    mid: usize,
    buf: *mut T,
    galloping: bool,
    min_gallop: &mut usize,
    is_less: &mut F,
) where
    F: Comparator<T>,
{
    let len = v.len();
    let v_ptr = v.as_mut_ptr();
    let v_mid = v_ptr.add(mid);

    ptr::copy_nonoverlapping(v_mid, buf, len - mid);

    // `hole.start..hole.end` is the unmerged rest of the right run, `hole.dest` one past the unmerged
    // rest of the left run. `out` is one past the last free output slot.
    // Invariant: `out == hole.dest + (hole.end - hole.start)`.
    let mut hole = MergeHole {
        start: buf,
        end: buf.add(len - mid),
        dest: v_mid,
    };
    let mut out = v_ptr.add(len);

    'merge: loop {
        let mut left_wins = 0usize;
        let mut right_wins = 0usize;

        // One pair at a time.
        loop {
            if hole.dest == v_ptr || hole.start == hole.end {
                break 'merge;
            }

            let left = hole.dest.sub(1);
            let right = hole.end.sub(1);
            out = out.sub(1);

            // If equal, prefer the right run to maintain stability.
            if is_less.less(&*right, &*left) {
                ptr::copy_nonoverlapping(left, out, 1);
                hole.dest = left;
                left_wins += 1;
                right_wins = 0;
            } else {
                ptr::copy_nonoverlapping(right, out, 1);
                hole.end = right;
                right_wins += 1;
                left_wins = 0;
            }

            if galloping && (left_wins >= *min_gallop || right_wins >= *min_gallop) {
                break;
            }
        }

        // Galloping.
        loop {
            if hole.dest == v_ptr || hole.start == hole.end {
                break 'merge;
            }

            let left_rest = slice::from_raw_parts(v_ptr, distance(v_ptr, hole.dest));
            let left_count =
                left_rest.len() - gallop_reverse_upper(left_rest, &*hole.end.sub(1), is_less);
            out = out.sub(left_count);
            hole.dest = hole.dest.sub(left_count);
            // May overlap, the destination leads the source by the rest of the right run.
            ptr::copy(hole.dest, out, left_count);
            if hole.dest == v_ptr {
                break 'merge;
            }

            out = out.sub(1);
            hole.end = hole.end.sub(1);
            ptr::copy_nonoverlapping(hole.end, out, 1);
            if hole.start == hole.end {
                break 'merge;
            }

            let right_rest = slice::from_raw_parts(hole.start, distance(hole.start, hole.end));
            let right_count =
                right_rest.len() - gallop_reverse_lower(right_rest, &*hole.dest.sub(1), is_less);
            out = out.sub(right_count);
            hole.end = hole.end.sub(right_count);
            ptr::copy_nonoverlapping(hole.end, out, right_count);
            if hole.start == hole.end {
                break 'merge;
            }

            out = out.sub(1);
            hole.dest = hole.dest.sub(1);
            ptr::copy_nonoverlapping(hole.dest, out, 1);

            if left_count < MIN_GALLOP && right_count < MIN_GALLOP {
                *min_gallop = min_gallop.saturating_add(2);
                break;
            }
            *min_gallop = min_gallop.saturating_sub(1).max(1);
        }
    }
    // `hole` gets dropped here and moves what is left of the right run into place.
}

/// Number of elements between `start` and `end`. `T` must not be zero-sized.
#[inline]
unsafe fn distance<T>(start: *const T, end: *const T) -> usize {
    end.offset_from(start) as usize
}

// When dropped, copies the range `start..end` into `dest..`.
//
// Panic safety: if `is_less` panics at any point during a merge, the hole is dropped and fills the
// gap in `v` with the unconsumed part of the scratch. So `v` still holds every element it initially
// held exactly once.
struct MergeHole<T> {
    start: *mut T,
    end: *mut T,
    dest: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `T` is not a zero-sized type, `start..end` lies in the scratch and `dest` points
        // at a gap of exactly that length in the merged slice.
        unsafe {
            let len = distance(self.start, self.end);
            ptr::copy_nonoverlapping(self.start, self.dest, len);
        }
    }
}
