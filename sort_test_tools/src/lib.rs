//! Shared test suite and input patterns for the sort implementations in this workspace.
//!
//! Every implementation wraps itself in a type implementing [`Sort`] and instantiates the whole
//! suite with [`instantiate_sort_tests!`].

pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;

    /// Whether every sort call is followed by a sortedness check that calls the comparison
    /// function again. Tests asserting exact comparison counts are skipped if so.
    fn checks_postcondition() -> bool {
        false
    }
}

pub mod patterns;
