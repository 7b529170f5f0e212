//! Temporary storage used by the merge engine.

use std::mem::MaybeUninit;

/// Smallest allocation made for a heap backed scratch, unless the limit is lower.
pub const INITIAL_SCRATCH_LEN: usize = 256;

/// Reusable scratch space for merges.
///
/// Only the spare capacity of the inner `Vec` is ever used, its length stays zero. The buffer never
/// holds live elements between two merges, so it can be reused across sort calls on different
/// inputs of the same type to avoid re-allocating.
pub struct ScratchBuffer<T> {
    storage: Vec<T>,
}

impl<T> ScratchBuffer<T> {
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements that can be held without growing.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Makes room for at least `len` elements and returns a pointer to the start of the scratch.
    ///
    /// Growth is geometric: the new capacity is the doubled old one, but never below
    /// [`INITIAL_SCRATCH_LEN`] and never above `limit`, except when `len` itself is larger.
    pub(crate) fn reserve_for(&mut self, len: usize, limit: usize) -> *mut T {
        debug_assert!(self.storage.is_empty());

        let capacity = self.storage.capacity();
        if capacity < len {
            let target = capacity
                .saturating_mul(2)
                .max(INITIAL_SCRATCH_LEN)
                .min(limit)
                .max(len);
            // Length is zero, so this is relative to nothing and no element is moved.
            self.storage.reserve_exact(target);
        }

        self.storage.as_mut_ptr()
    }
}

impl<T> Default for ScratchBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Backing of the scratch seen by one merge state.
pub(crate) enum Scratch<'a, T> {
    /// Heap buffer, grown on demand up to `limit` elements.
    Growable {
        buf: &'a mut ScratchBuffer<T>,
        limit: usize,
    },
    /// Fixed slice, usually a stack array. Never grows.
    Fixed(&'a mut [MaybeUninit<T>]),
}

impl<'a, T> Scratch<'a, T> {
    /// Largest run that may be copied into the scratch.
    #[inline]
    pub(crate) fn limit(&self) -> usize {
        match self {
            Scratch::Growable { limit, .. } => *limit,
            Scratch::Fixed(slots) => slots.len(),
        }
    }

    /// Returns storage for `len` elements. `len` must not exceed `limit()`.
    pub(crate) fn reserve(&mut self, len: usize) -> *mut T {
        debug_assert!(len <= self.limit());

        match self {
            Scratch::Growable { buf, limit } => buf.reserve_for(len, *limit),
            Scratch::Fixed(slots) => slots.as_mut_ptr().cast::<T>(),
        }
    }
}
