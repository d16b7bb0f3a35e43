// Sortvis Engine - Host Capability
//
// The three things an algorithm needs from whoever owns the bars: the live
// sequence, a render trigger, and the current pacing delay.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::{SortError, SortResult};

/// Shared handle to a live sequence of bar heights.
///
/// Clones point at the same storage, so the render step always sees the
/// state an algorithm just produced without the array being passed around.
/// The lock is only ever held for a single read or swap, never across a
/// suspension point.
#[derive(Debug, Clone, Default)]
pub struct BarHeights {
    values: Arc<Mutex<Vec<u32>>>,
}

impl BarHeights {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u32>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Height at `index`
    ///
    /// # Returns
    ///
    /// * `Err(SortError::IndexOutOfBounds)` - If `index` is outside `[0, len)`
    pub fn get(&self, index: usize) -> SortResult<u32> {
        let values = self.lock();
        values.get(index).copied().ok_or(SortError::IndexOutOfBounds {
            len: values.len(),
            i: index,
            j: index,
        })
    }

    /// `bars[a] > bars[b]`, read under a single lock
    pub fn greater(&self, a: usize, b: usize) -> SortResult<bool> {
        let values = self.lock();
        match (values.get(a), values.get(b)) {
            (Some(x), Some(y)) => Ok(x > y),
            _ => Err(SortError::IndexOutOfBounds {
                len: values.len(),
                i: a,
                j: b,
            }),
        }
    }

    /// Exchange two positions.
    ///
    /// # Returns
    ///
    /// * `Err(SortError::IndexOutOfBounds)` - If either index is outside `[0, len)`
    pub fn swap(&self, i: usize, j: usize) -> SortResult<()> {
        let mut values = self.lock();
        let len = values.len();
        if i >= len || j >= len {
            return Err(SortError::IndexOutOfBounds { len, i, j });
        }
        values.swap(i, j);
        Ok(())
    }

    /// Run `f` against the current heights without copying them
    pub fn with<R>(&self, f: impl FnOnce(&[u32]) -> R) -> R {
        f(&self.lock())
    }

    /// Copy of the current heights
    pub fn snapshot(&self) -> Vec<u32> {
        self.lock().clone()
    }

    /// Replace the whole sequence (regeneration)
    pub fn replace(&self, values: Vec<u32>) {
        *self.lock() = values;
    }
}

/// Capabilities a host lends to an algorithm for one run.
///
/// The algorithm mutates [`AlgoHost::bar_heights`] in place and, after every
/// swap, calls [`AlgoHost::render_bars`] and then awaits [`AlgoHost::tick`].
/// Render always comes before the pause.
#[async_trait]
pub trait AlgoHost: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// The live sequence being sorted
    fn bar_heights(&self) -> &BarHeights;

    /// Draw the current state of [`AlgoHost::bar_heights`]
    fn render_bars(&self) -> SortResult<()>;

    /// Current pacing delay. Read again on every tick so speed changes take
    /// effect mid-run.
    fn delay(&self) -> Duration;

    /// Suspend for the current delay
    async fn tick(&self) {
        tokio::time::sleep(self.delay()).await;
    }
}
