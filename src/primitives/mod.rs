//! Building blocks shared by every merge sort in this crate.

pub mod gallop;
pub mod insertion;
pub mod run;
