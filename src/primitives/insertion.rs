use crate::comparator::Comparator;

/// Sorts `v` using binary insertion sort, assuming `v[..offset]` is already sorted.
///
/// Each element is placed after every element it is not less than, so equal elements keep their
/// relative order. Used on its own for short inputs and to extend short natural runs.
pub fn binary_insertion_sort<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    F: Comparator<T>,
{
    let len = v.len();
    debug_assert!(offset <= len);

    for i in offset.max(1)..len {
        let pos = insertion_point(&v[..i], &v[i], is_less);
        // Shift `v[pos..i]` one to the right and put `v[i]` at `pos`.
        v[pos..=i].rotate_right(1);
    }
}

/// Returns the index of the first element in `sorted` that `value` is less than.
#[inline]
fn insertion_point<T, F>(sorted: &[T], value: &T, is_less: &mut F) -> usize
where
    F: Comparator<T>,
{
    let mut lo = 0;
    let mut hi = sorted.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if is_less.less(value, &sorted[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}
