#![no_main]

use libfuzzer_sys::fuzz_target;

use mergesort_comp::stable::natural as test_sort;

fuzz_target!(|data: &[u8]| {
    // First byte picks the entry point, the rest are keys tagged with their position.
    let Some((&mode, keys)) = data.split_first() else {
        return;
    };

    let mut v: Vec<(u8, usize)> = keys.iter().copied().zip(0..).collect();
    let mut expected = v.clone();
    expected.sort_by_key(|x| x.0);

    if mode % 2 == 0 {
        test_sort::sort_by(&mut v, |a, b| a.0.cmp(&b.0));
    } else {
        test_sort::sort_in_place_by(&mut v, |a, b| a.0.cmp(&b.0));
    }
    assert_eq!(v, expected);
});
