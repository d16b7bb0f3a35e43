// Sortvis Host - Sort Card
//
// One visual unit: a surface, the bars drawn on it, and the algorithm that
// sorts them.

use async_trait::async_trait;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use sortvis_utils::{AlgorithmKey, SortingSettings};

use super::surface::{BarLayout, RenderSurface, SurfaceSize};
use super::FlagGuard;
use crate::algorithms::{create_algorithm, AlgoHost, BarHeights, SortStats};
use crate::error::{SortError, SortResult};

/// Whether a host is running a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Idle,
    Sorting,
}

impl fmt::Display for HostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostState::Idle => write!(f, "idle"),
            HostState::Sorting => write!(f, "sorting"),
        }
    }
}

/// What a regeneration request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New bars were generated and drawn
    Regenerated,
    /// The surface is not ready yet; nothing happened
    SurfaceNotReady,
    /// A run owns the bars; the request was dropped, not queued
    SuppressedWhileSorting,
    /// Spacing is already at its limit
    Unchanged,
}

/// Animation host for a single algorithm.
///
/// `SortCard` owns one bar sequence and lends it, together with its render
/// and delay capabilities, to an algorithm for the duration of a run. At
/// most one run is active per card: a second `sort()` while one is running
/// fails with [`SortError::AlreadySorting`], and regeneration requests are
/// suppressed until the run ends.
///
/// Runs and regenerations take the same busy flag, so a regeneration in
/// progress also turns a `sort()` away. The card reports `Sorting` for the
/// brief duration of a regeneration.
///
/// # Example
///
/// ```ignore
/// let card = SortCard::new(AlgorithmKey::QuickSort, settings, surface);
/// card.refresh()?;
/// let stats = card.sort().await?;
/// ```
pub struct SortCard {
    key: AlgorithmKey,

    /// Global speed and density sliders
    settings: Arc<SortingSettings>,

    surface: Arc<dyn RenderSurface>,

    bars: BarHeights,

    /// Pixel distance between bars; starts at the global density
    spacing: AtomicU32,

    /// Held by a run or a regeneration for as long as it owns the bars
    busy: AtomicBool,

    rng: Mutex<StdRng>,
}

impl SortCard {
    /// Create a card with no bars yet. Call [`SortCard::refresh`] once the
    /// surface is ready to generate the first set.
    pub fn new(
        key: AlgorithmKey,
        settings: Arc<SortingSettings>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        Self {
            key,
            spacing: AtomicU32::new(settings.density()),
            settings,
            surface,
            bars: BarHeights::default(),
            busy: AtomicBool::new(false),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Use a fixed seed for bar generation
    pub fn with_seed(self, seed: u64) -> Self {
        *self.rng.lock().unwrap_or_else(PoisonError::into_inner) = StdRng::seed_from_u64(seed);
        self
    }

    pub fn key(&self) -> AlgorithmKey {
        self.key
    }

    pub fn spacing(&self) -> u32 {
        self.spacing.load(Ordering::Relaxed)
    }

    pub fn state(&self) -> HostState {
        if self.is_sorting() {
            HostState::Sorting
        } else {
            HostState::Idle
        }
    }

    pub fn is_sorting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Copy of the current bars
    pub fn bar_values(&self) -> Vec<u32> {
        self.bars.snapshot()
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Run this card's algorithm over its bars until they are sorted.
    ///
    /// The card is `Sorting` for the whole run and returns to `Idle`
    /// afterwards, including when the run fails.
    ///
    /// # Returns
    ///
    /// * `Ok(SortStats)` - Swaps and comparisons performed
    /// * `Err(SortError::AlreadySorting)` - If a run is already active on this card
    /// * `Err(SortError)` - Any error raised by the run itself
    pub async fn sort(&self) -> SortResult<SortStats> {
        let _sorting =
            FlagGuard::acquire(&self.busy).ok_or(SortError::AlreadySorting(self.key))?;

        info!("{}: sorting {} bars", self.key, self.bars.len());
        let result = create_algorithm(self.key, self).sort().await;

        match &result {
            Ok(stats) => info!(
                "{}: sorted with {} swaps, {} comparisons",
                self.key, stats.swaps, stats.comparisons
            ),
            Err(e) => warn!("{}: sort failed: {}", self.key, e),
        }
        result
    }

    /// Regenerate and redraw the bars without animation.
    ///
    /// A no-op while sorting or before the surface is ready.
    pub fn refresh(&self) -> SortResult<RefreshOutcome> {
        let Some(_busy) = FlagGuard::acquire(&self.busy) else {
            debug!("{}: refresh suppressed while sorting", self.key);
            return Ok(RefreshOutcome::SuppressedWhileSorting);
        };
        self.regenerate()
    }

    /// Adopt the global density and regenerate.
    ///
    /// Skipped while sorting; the skipped change is not replayed when the
    /// run ends.
    pub fn sync_density(&self) -> SortResult<RefreshOutcome> {
        let Some(_busy) = FlagGuard::acquire(&self.busy) else {
            debug!("{}: density sync suppressed while sorting", self.key);
            return Ok(RefreshOutcome::SuppressedWhileSorting);
        };
        self.spacing
            .store(self.settings.density(), Ordering::Relaxed);
        self.regenerate()
    }

    /// More bars: tighten spacing by one, down to the density minimum
    pub fn increase_bars(&self) -> SortResult<RefreshOutcome> {
        let min = self.settings.config().density.min;
        self.adjust_spacing(|spacing| (spacing > min).then(|| spacing - 1))
    }

    /// Fewer bars: widen spacing by one, up to the density maximum
    pub fn decrease_bars(&self) -> SortResult<RefreshOutcome> {
        let max = self.settings.config().density.max;
        self.adjust_spacing(|spacing| (spacing < max).then(|| spacing + 1))
    }

    fn adjust_spacing(&self, next: impl FnOnce(u32) -> Option<u32>) -> SortResult<RefreshOutcome> {
        let Some(_busy) = FlagGuard::acquire(&self.busy) else {
            return Ok(RefreshOutcome::SuppressedWhileSorting);
        };
        match next(self.spacing()) {
            Some(spacing) => {
                self.spacing.store(spacing, Ordering::Relaxed);
                self.regenerate()
            }
            None => Ok(RefreshOutcome::Unchanged),
        }
    }

    /// Caller holds the busy flag
    fn regenerate(&self) -> SortResult<RefreshOutcome> {
        let Some(size) = self.surface.size() else {
            debug!("{}: surface not ready, skipping refresh", self.key);
            return Ok(RefreshOutcome::SurfaceNotReady);
        };

        self.generate_bar_heights(size);
        self.draw_bars()?;
        Ok(RefreshOutcome::Regenerated)
    }

    fn layout(&self, size: SurfaceSize) -> BarLayout {
        let config = self.settings.config();
        let spacing = self.spacing().max(1);
        BarLayout {
            padding: config.canvas.padding,
            spacing,
            line_width: config.bar.line_width(spacing),
            width: size.width.max(config.canvas.min_width),
            height: size.height,
        }
    }

    /// One bar per `spacing` pixels across the surface, each between half
    /// the surface height and the bottom padding.
    fn generate_bar_heights(&self, size: SurfaceSize) {
        let layout = self.layout(size);
        let half = layout.height / 2;
        let spread = half.saturating_sub(layout.padding);

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let values: Vec<u32> = (layout.padding..layout.width)
            .step_by(layout.spacing as usize)
            .map(|_| {
                if spread > 0 {
                    half + rng.gen_range(0..spread)
                } else {
                    half
                }
            })
            .collect();

        debug!(
            "{}: generated {} bars for {}x{}",
            self.key,
            values.len(),
            layout.width,
            layout.height
        );
        self.bars.replace(values);
    }

    fn draw_bars(&self) -> SortResult<()> {
        let Some(size) = self.surface.size() else {
            return Ok(());
        };
        let layout = self.layout(size);
        self.bars.with(|bars| self.surface.draw(bars, &layout))
    }
}

#[async_trait]
impl AlgoHost for SortCard {
    fn name(&self) -> &str {
        self.key.as_str()
    }

    fn bar_heights(&self) -> &BarHeights {
        &self.bars
    }

    fn render_bars(&self) -> SortResult<()> {
        self.draw_bars()
    }

    fn delay(&self) -> Duration {
        self.settings.current_delay()
    }
}

#[cfg(test)]
#[path = "./unit/card_tests.rs"]
mod card_tests;
