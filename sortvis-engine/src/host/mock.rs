// Sortvis Host - Mock Surface
//
// RenderSurface double for host and board tests: starts unready, records
// draws, and can be told to fail.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::surface::{BarLayout, RenderSurface, SurfaceSize};
use crate::error::{SortError, SortResult};

/// Mock surface for testing hosts without a terminal.
///
/// # Example
///
/// ```ignore
/// let surface = Arc::new(MockSurface::ready(300, 260));
/// let card = SortCard::new(AlgorithmKey::BubbleSort, settings, surface.clone());
/// card.refresh()?;
/// assert_eq!(surface.draw_count(), 1);
/// ```
#[derive(Default)]
pub struct MockSurface {
    size: Mutex<Option<SurfaceSize>>,
    draw_count: AtomicUsize,
    last_frame: Mutex<Option<(Vec<u32>, BarLayout)>>,
    failing: AtomicBool,
}

impl MockSurface {
    /// A surface that is not ready yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that is ready with the given size
    pub fn ready(width: u32, height: u32) -> Self {
        let surface = Self::new();
        surface.set_size(Some(SurfaceSize::new(width, height)));
        surface
    }

    /// Change the reported size; `None` makes the surface unready
    pub fn set_size(&self, size: Option<SurfaceSize>) {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner) = size;
    }

    /// Make every subsequent draw fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count.load(Ordering::Relaxed)
    }

    /// Bars and layout of the most recent successful draw
    pub fn last_frame(&self) -> Option<(Vec<u32>, BarLayout)> {
        self.last_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RenderSurface for MockSurface {
    fn size(&self) -> Option<SurfaceSize> {
        *self.size.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn draw(&self, bars: &[u32], layout: &BarLayout) -> SortResult<()> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(SortError::RenderFailed("mock surface failure".to_string()));
        }
        self.draw_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((bars.to_vec(), *layout));
        Ok(())
    }
}
