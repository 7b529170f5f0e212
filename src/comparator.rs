//! The strict weak order every sort in this crate is parameterized over.
//!
//! Only `less` is user supplied, the other relations are derived from it. Two elements `a` and
//! `b` are considered equal iff `!less(a, b) && !less(b, a)`, which is what stability refers to.

/// A "less-than" relation. Implemented for every `FnMut(&T, &T) -> bool`.
///
/// Implementations must be deterministic for the duration of one sort call. If they are not, the
/// result is an unspecified permutation of the input, never undefined behavior.
pub trait Comparator<T> {
    fn less(&mut self, a: &T, b: &T) -> bool;

    #[inline]
    fn greater(&mut self, a: &T, b: &T) -> bool {
        self.less(b, a)
    }

    #[inline]
    fn less_equal(&mut self, a: &T, b: &T) -> bool {
        !self.less(b, a)
    }

    #[inline]
    fn greater_equal(&mut self, a: &T, b: &T) -> bool {
        !self.less(a, b)
    }
}

impl<T, F> Comparator<T> for F
where
    F: FnMut(&T, &T) -> bool,
{
    #[inline]
    fn less(&mut self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
