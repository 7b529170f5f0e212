//! Bookkeeping of the runs that are sorted but not merged yet.
//!
//! Runs are pushed left to right. After every push some adjacent pairs are merged so that, for any
//! three consecutive runs `a, b, c` (bottom to top), `a.len > b.len + c.len` and `b.len > c.len`.
//! Run lengths then grow at least as fast as the Fibonacci numbers from the top of the stack to its
//! bottom, which bounds both the stack depth and the total merge cost to `O(n log n)`.
//!
//! TimSort is infamous for its buggy implementations, as described here:
//! http://envisage-project.eu/timsort-specification-and-verification/
//!
//! The gist of the story is: checking the invariant on the top three runs only is not enough for it
//! to hold for *all* runs in the stack. [`CollapsePolicy::TopFour`] checks the top four runs, which
//! is sufficient. [`CollapsePolicy::FullScan`] re-checks every triple instead.

use crate::comparator::Comparator;
use crate::merge::{merge, MergeState};

/// A sorted, contiguous range `start..start + len` of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub len: usize,
}

impl Run {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// How the stack decides which pair of runs to merge next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollapsePolicy {
    /// Check the invariant on the top four runs after each push.
    TopFour,
    /// Scan the whole stack from the top for the first violation after each push.
    FullScan,
}

/// Upper bound for the stack depth. With the invariant in place run lengths grow at least like the
/// Fibonacci numbers, and `fib(94)` already exceeds `usize::MAX`.
pub const MAX_RUNS: usize = 96;

/// Stack of pending runs, bottom first. Lives inline, pushing never allocates.
#[derive(Debug)]
pub struct RunStack {
    runs: [Run; MAX_RUNS],
    len: usize,
    policy: CollapsePolicy,
}

impl RunStack {
    pub fn new(policy: CollapsePolicy) -> Self {
        Self {
            runs: [Run { start: 0, len: 0 }; MAX_RUNS],
            len: 0,
            policy,
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pushes the run that directly follows the current top run.
    ///
    /// Panics if the stack is full, which can only happen if runs were pushed without collapsing.
    pub fn push(&mut self, run: Run) {
        debug_assert!(self.runs().last().map_or(true, |top| top.end() == run.start));
        assert!(self.len < MAX_RUNS, "run stack overflow");

        self.runs[self.len] = run;
        self.len += 1;
    }

    /// Identifies the next pair of runs to merge. If `Some(r)` is returned, `runs[r]` and
    /// `runs[r + 1]` must be merged next. `None` means a new run should be built instead.
    ///
    /// With `force` every call demands a merge until a single run is left, in order to complete
    /// the sort.
    pub fn next_merge(&self, force: bool) -> Option<usize> {
        let runs = self.runs();
        let n = runs.len();

        if n < 2 {
            return None;
        }

        if force {
            return Some(pick_pair(runs, n - 1));
        }

        match self.policy {
            CollapsePolicy::TopFour => {
                if runs[n - 2].len <= runs[n - 1].len
                    || (n >= 3 && runs[n - 3].len <= runs[n - 2].len + runs[n - 1].len)
                    || (n >= 4 && runs[n - 4].len <= runs[n - 3].len + runs[n - 2].len)
                {
                    Some(pick_pair(runs, n - 1))
                } else {
                    None
                }
            }
            CollapsePolicy::FullScan => (1..n)
                .rev()
                .find(|&i| {
                    runs[i - 1].len <= runs[i].len
                        || (i >= 2 && runs[i - 2].len <= runs[i - 1].len + runs[i].len)
                })
                .map(|i| pick_pair(runs, i)),
        }
    }

    /// Replaces `runs[r]` and `runs[r + 1]` by their union. The elements must have been merged
    /// already.
    pub fn combine(&mut self, r: usize) {
        assert!(r + 1 < self.len);

        let right = self.runs[r + 1];
        debug_assert_eq!(self.runs[r].end(), right.start);
        self.runs[r].len += right.len;
        self.runs.copy_within(r + 2..self.len, r + 1);
        self.len -= 1;
    }

    /// Merges runs until [`Self::next_merge`] is satisfied.
    pub fn collapse<T, F>(
        &mut self,
        v: &mut [T],
        force: bool,
        state: &mut MergeState<'_, T>,
        is_less: &mut F,
    ) where
        F: Comparator<T>,
    {
        while let Some(r) = self.next_merge(force) {
            let left = self.runs[r];
            let right = self.runs[r + 1];
            merge(&mut v[left.start..right.end()], left.len, state, is_less);
            self.combine(r);
        }

        debug_assert!(force || self.invariant_holds());
    }

    /// Whether the size invariant holds for every triple of adjacent runs.
    pub fn invariant_holds(&self) -> bool {
        let runs = self.runs();

        runs.windows(2).all(|w| w[0].len > w[1].len)
            && runs.windows(3).all(|w| w[0].len > w[1].len + w[2].len)
    }
}

// Given a violation at the triple ending in `runs[top]`, the middle run is merged with its shorter
// neighbor.
#[inline]
fn pick_pair(runs: &[Run], top: usize) -> usize {
    if top >= 2 && runs[top - 2].len < runs[top].len {
        top - 2
    } else {
        top - 1
    }
}
