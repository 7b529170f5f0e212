#![no_main]

use libfuzzer_sys::fuzz_target;

use mergesort_comp::stable::timsort as test_sort;

fuzz_target!(|data: &[u8]| {
    // Pairs of (key, position), so that any reordering of equal keys is caught.
    let mut v: Vec<(u8, usize)> = data.iter().copied().zip(0..).collect();
    let mut expected = v.clone();
    expected.sort_by_key(|x| x.0);

    test_sort::sort_by(&mut v, |a, b| a.0.cmp(&b.0));
    assert_eq!(v, expected);
});
