//! Adaptive stable merge sorts.
//!
//! Two designs share the same primitives:
//!
//! - [`stable::timsort`] builds natural runs, keeps them on a stack under the TimSort invariant
//!   and merges with galloping. Scratch grows up to half the input length.
//! - [`stable::natural`] is a natural merge sort with sub-linear scratch. Merges whose shorter run
//!   does not fit into the scratch are decomposed with block rotations.
//!
//! Both are stable, only ever allocate scratch memory (none at all with a caller supplied
//! [`ScratchBuffer`] that is large enough) and stay memory safe with comparison functions that
//! violate a total order.

use std::cmp::Ordering;

pub mod comparator;
pub mod merge;
pub mod primitives;
pub mod run_stack;
pub mod scratch;
pub mod stable;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use comparator::Comparator;
pub use scratch::ScratchBuffer;

/// Sorting methods on slices, written against the generic merge core.
pub trait SortExt<T> {
    fn timsort(&mut self)
    where
        T: Ord;

    fn timsort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;

    fn timsort_by_less<F>(&mut self, is_less: F)
    where
        F: FnMut(&T, &T) -> bool;

    fn stable_sort(&mut self)
    where
        T: Ord;

    fn stable_sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;

    fn stable_sort_by_less<F>(&mut self, is_less: F)
    where
        F: FnMut(&T, &T) -> bool;
}

impl<T> SortExt<T> for [T] {
    #[inline]
    fn timsort(&mut self)
    where
        T: Ord,
    {
        stable::timsort::sort(self);
    }

    #[inline]
    fn timsort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        stable::timsort::sort_by(self, compare);
    }

    #[inline]
    fn timsort_by_less<F>(&mut self, is_less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        stable::timsort::sort_by_less(self, is_less);
    }

    #[inline]
    fn stable_sort(&mut self)
    where
        T: Ord,
    {
        stable::natural::sort(self);
    }

    #[inline]
    fn stable_sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        stable::natural::sort_by(self, compare);
    }

    #[inline]
    fn stable_sort_by_less<F>(&mut self, is_less: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        stable::natural::sort_by_less(self, is_less);
    }
}

/// Checks the sortedness postcondition. Only active in debug builds with the `verify_sorted`
/// feature, a failure means the implementation is broken.
#[inline]
pub(crate) fn debug_verify_sorted<T, F>(v: &[T], is_less: &mut F)
where
    F: Comparator<T>,
{
    if cfg!(all(debug_assertions, feature = "verify_sorted")) {
        for i in 1..v.len() {
            assert!(
                !is_less.less(&v[i], &v[i - 1]),
                "sort postcondition violated at index {i}"
            );
        }
    }
}
