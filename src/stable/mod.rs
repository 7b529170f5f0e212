//! Top-level stable sorts. Every design exposes `sort`, `sort_by`, `sort_by_less` and
//! `sort_with_buffer`.

pub mod natural;
pub mod timsort;
