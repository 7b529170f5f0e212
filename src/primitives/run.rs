use crate::comparator::Comparator;
use crate::primitives::insertion::binary_insertion_sort;

/// Inputs shorter than this are sorted with a single binary insertion sort.
pub const MIN_MERGE: usize = 64;

/// Finds the natural run at the start of `v` and returns its length.
///
/// A run is either non-descending, or strictly descending. Strictly descending runs are reversed in
/// place, ties end them so equal elements are never swapped. Slices shorter than two elements are
/// returned as is, without calling `is_less`.
pub fn find_run<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    let len = v.len();

    if len < 2 {
        return len;
    }

    let mut end = 2;

    if is_less.less_equal(&v[0], &v[1]) {
        while end < len && is_less.less_equal(&v[end - 1], &v[end]) {
            end += 1;
        }
    } else {
        while end < len && is_less.greater(&v[end - 1], &v[end]) {
            end += 1;
        }
        v[..end].reverse();
    }

    end
}

/// Minimum run length for an input of `len` elements.
///
/// Returns `len` for short inputs. Otherwise the result lies in `[MIN_MERGE / 2, MIN_MERGE]` and is
/// chosen so that `len / min_run` is a power of two or slightly less than one. That keeps the final
/// merges balanced.
pub fn min_run_length(len: usize) -> usize {
    let mut n = len;
    // Becomes 1 if any of the shifted out bits is set.
    let mut r = 0;

    while n >= MIN_MERGE {
        r |= n & 1;
        n >>= 1;
    }

    n + r
}

/// Finds the natural run at the start of `v` and, if it is shorter than `min_run`, extends it with
/// binary insertion sort to `min_run` elements or the end of `v`. Returns the length of the sorted
/// prefix.
pub fn extend_run<T, F>(v: &mut [T], min_run: usize, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    let run_len = find_run(v, is_less);

    if run_len >= min_run {
        return run_len;
    }

    let extended = min_run.min(v.len());
    binary_insertion_sort(&mut v[..extended], run_len, is_less);
    extended
}
