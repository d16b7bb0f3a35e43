// Sortvis Sorting Algorithm Engine
//
// Five textbook sorts instrumented to yield after every swap, so a host can
// draw each intermediate state and pause before the next one.
//
// # Architecture
//
// ```text
//   SortCard / RecordingHost
//          │ implements
//          ▼
// ┌───────────────────┐
// │     AlgoHost      │  ← live bars, render trigger, delay
// └───────────────────┘
//          │ borrowed by
//          ▼
// ┌───────────────────┐
// │     Algorithm     │  ← key → one of quick/shell/insertion/selection/bubble
// └───────────────────┘
//          │ drives
//          ▼
// ┌───────────────────┐
// │      Stepper      │  ← swap → render → tick, counts swaps and comparisons
// └───────────────────┘
// ```
//
// # Usage
//
// ```ignore
// let algo = create_algorithm(AlgorithmKey::QuickSort, &host);
// let stats = algo.sort().await?;
// ```
//
// For testing:
// ```ignore
// let host = RecordingHost::new(vec![3, 1, 2]);
// create_algorithm(AlgorithmKey::SelectionSort, &host).sort().await?;
// assert_eq!(host.frames(), vec![vec![2, 1, 3], vec![1, 2, 3]]);
// ```

mod bubble;
mod host;
mod insertion;
mod mock;
mod quick;
mod selection;
mod shell;

pub use host::{AlgoHost, BarHeights};
pub use mock::{HostEvent, RecordingHost};

use log::debug;
use serde::Serialize;
use sortvis_utils::AlgorithmKey;

use crate::error::SortResult;

/// Work done by one completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortStats {
    /// Swaps performed; equals the number of frames rendered
    pub swaps: usize,
    /// Element comparisons performed
    pub comparisons: usize,
}

/// Step primitive shared by every algorithm.
///
/// Wraps the host so algorithms only compare and swap; the render-then-tick
/// contract lives here.
pub(crate) struct Stepper<'h> {
    host: &'h dyn AlgoHost,
    stats: SortStats,
}

impl<'h> Stepper<'h> {
    fn new(host: &'h dyn AlgoHost) -> Self {
        Self {
            host,
            stats: SortStats::default(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.host.bar_heights().len()
    }

    pub(crate) fn get(&self, index: usize) -> SortResult<u32> {
        self.host.bar_heights().get(index)
    }

    /// `bars[a] > bars[b]`
    pub(crate) fn greater(&mut self, a: usize, b: usize) -> SortResult<bool> {
        self.stats.comparisons += 1;
        self.host.bar_heights().greater(a, b)
    }

    /// `bars[a] < value`
    pub(crate) fn less_than(&mut self, a: usize, value: u32) -> SortResult<bool> {
        self.stats.comparisons += 1;
        Ok(self.get(a)? < value)
    }

    /// Swap, render the new state, then suspend for the current delay.
    pub(crate) async fn swap(&mut self, i: usize, j: usize) -> SortResult<()> {
        self.host.bar_heights().swap(i, j)?;
        self.stats.swaps += 1;
        self.host.render_bars()?;
        self.host.tick().await;
        Ok(())
    }
}

/// One algorithm bound to one host for a single run
pub struct Algorithm<'h> {
    key: AlgorithmKey,
    host: &'h dyn AlgoHost,
}

/// Bind the algorithm named by `key` to `host`.
///
/// Key validation happens when the key is parsed, so this cannot fail.
pub fn create_algorithm(key: AlgorithmKey, host: &dyn AlgoHost) -> Algorithm<'_> {
    Algorithm { key, host }
}

impl<'h> Algorithm<'h> {
    pub fn key(&self) -> AlgorithmKey {
        self.key
    }

    /// Sort the host's bars ascending in place, one frame per swap.
    ///
    /// # Returns
    ///
    /// * `Ok(SortStats)` - Once the sequence is fully ordered
    /// * `Err(SortError)` - If a swap leaves the sequence bounds or a render fails
    pub async fn sort(&self) -> SortResult<SortStats> {
        let mut steps = Stepper::new(self.host);
        debug!(
            "{}: {} starting on {} bars",
            self.host.name(),
            self.key,
            steps.len()
        );

        match self.key {
            AlgorithmKey::QuickSort => quick::sort(&mut steps).await?,
            AlgorithmKey::ShellSort => shell::sort(&mut steps).await?,
            AlgorithmKey::InsertionSort => insertion::sort(&mut steps).await?,
            AlgorithmKey::SelectionSort => selection::sort(&mut steps).await?,
            AlgorithmKey::BubbleSort => bubble::sort(&mut steps).await?,
        }

        debug!(
            "{}: {} finished with {} swaps, {} comparisons",
            self.host.name(),
            self.key,
            steps.stats.swaps,
            steps.stats.comparisons
        );
        Ok(steps.stats)
    }
}

#[cfg(test)]
#[path = "./unit/algorithm_tests.rs"]
mod algorithm_tests;
