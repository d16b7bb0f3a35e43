// Sortvis Animation Host
//
// Owns the bars for one visual unit, binds them to an algorithm for a run,
// and keeps at most one run active per host. A board fans runs out across
// every host.
//
// State machine per host:
//
// ```text
//   Idle ──sort()──▶ Sorting ──finished / failed──▶ Idle
//     ▲                 │
//     └─ refresh(), density sync: suppressed while Sorting
// ```

mod board;
mod card;
mod mock;
mod surface;

pub use board::{BoardReport, CardReport, SortBoard};
pub use card::{HostState, RefreshOutcome, SortCard};
pub use mock::MockSurface;
pub use surface::{BarLayout, RenderSurface, SurfaceSize};

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds a busy flag for as long as it lives.
///
/// Dropping the guard clears the flag, so the flag is released whether the
/// guarded work finishes, fails, panics or is dropped mid-await.
pub(crate) struct FlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlagGuard<'a> {
    /// Set the flag, or return `None` if it was already set
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
