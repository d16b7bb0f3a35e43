// Sortvis Engine - Recording Host
//
// In-memory AlgoHost for exercising algorithms without a drawing surface or
// real timers. Records every rendered frame and the render/tick ordering,
// and can simulate a failing renderer.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::host::{AlgoHost, BarHeights};
use crate::error::{SortError, SortResult};

/// One observable host interaction, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Render,
    Tick(Duration),
}

/// Host double that records what an algorithm did to it.
///
/// `RecordingHost` allows tests to:
/// - Inspect every frame the algorithm rendered
/// - Verify that each render is followed by exactly one tick
/// - Count how often the pacing delay was read
/// - Make the Nth render fail
///
/// Ticks yield to the scheduler instead of sleeping, so runs complete
/// without advancing time.
///
/// # Example
///
/// ```ignore
/// let host = RecordingHost::new(vec![3, 1, 2]);
/// create_algorithm(AlgorithmKey::InsertionSort, &host).sort().await?;
/// assert_eq!(host.bar_values(), vec![1, 2, 3]);
/// assert_eq!(host.render_count(), 2);
/// ```
pub struct RecordingHost {
    name: String,

    bars: BarHeights,

    /// Snapshot of the bars at each render
    frames: Arc<Mutex<Vec<Vec<u32>>>>,

    /// Render and tick events in call order
    events: Arc<Mutex<Vec<HostEvent>>>,

    /// Current delay in milliseconds
    delay_ms: Arc<AtomicU64>,

    /// Count of `delay()` reads
    delay_reads: Arc<AtomicUsize>,

    /// Render number (1-based) that should fail, 0 for never
    fail_on_render: Arc<AtomicUsize>,
}

impl RecordingHost {
    /// Create a host owning `values`.
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            name: "recording".to_string(),
            bars: BarHeights::new(values),
            frames: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(Mutex::new(Vec::new())),
            delay_ms: Arc::new(AtomicU64::new(0)),
            delay_reads: Arc::new(AtomicUsize::new(0)),
            fail_on_render: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the delay reported to the algorithm
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::Relaxed);
    }

    /// Make the `n`th render (1-based) return `SortError::RenderFailed`
    pub fn fail_on_render(&self, n: usize) {
        self.fail_on_render.store(n, Ordering::Relaxed);
    }

    /// Current bar values
    pub fn bar_values(&self) -> Vec<u32> {
        self.bars.snapshot()
    }

    /// Every frame rendered so far
    pub fn frames(&self) -> Vec<Vec<u32>> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of renders so far
    pub fn render_count(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Render and tick events in the order they happened
    pub fn events(&self) -> Vec<HostEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times the delay was read
    pub fn delay_reads(&self) -> usize {
        self.delay_reads.load(Ordering::Relaxed)
    }

    fn push_event(&self, event: HostEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[async_trait]
impl AlgoHost for RecordingHost {
    fn name(&self) -> &str {
        &self.name
    }

    fn bar_heights(&self) -> &BarHeights {
        &self.bars
    }

    fn render_bars(&self) -> SortResult<()> {
        let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        let fail_on = self.fail_on_render.load(Ordering::Relaxed);
        if fail_on != 0 && frames.len() + 1 == fail_on {
            return Err(SortError::RenderFailed(format!(
                "simulated failure on render {}",
                fail_on
            )));
        }
        frames.push(self.bars.snapshot());
        drop(frames);

        self.push_event(HostEvent::Render);
        Ok(())
    }

    fn delay(&self) -> Duration {
        self.delay_reads.fetch_add(1, Ordering::Relaxed);
        Duration::from_millis(self.delay_ms.load(Ordering::Relaxed))
    }

    async fn tick(&self) {
        let delay = self.delay();
        self.push_event(HostEvent::Tick(delay));
        tokio::task::yield_now().await;
    }
}
