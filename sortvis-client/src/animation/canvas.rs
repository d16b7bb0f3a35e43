// Sortvis Client: terminal render surface
//
// Draws one card's bar chart into a band of terminal rows. Several canvases
// can share one writer, each at its own row offset.

use log::debug;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use sortvis_engine::{BarLayout, RenderSurface, SortResult, SurfaceSize};

use super::bars::BarChart;
use super::engine::FrameComposer;

/// Terminal region that a card draws its bars into.
///
/// The canvas reports its pixel `size` to the host (bars are generated in
/// that space) and scales them onto a `cols` x `rows` character grid. It is
/// not ready until [`TerminalCanvas::mark_ready`] is called, so hosts skip
/// regeneration requests that arrive before the screen is set up.
pub struct TerminalCanvas<W: Write + Send> {
    title: String,
    size: SurfaceSize,
    /// 1-based terminal row of the title line
    origin_row: usize,
    ready: AtomicBool,
    chart: Mutex<BarChart>,
    out: Arc<Mutex<W>>,
    frames_drawn: AtomicUsize,
}

impl<W: Write + Send> TerminalCanvas<W> {
    pub fn new(
        title: impl Into<String>,
        size: SurfaceSize,
        grid: (usize, usize),
        origin_row: usize,
        out: Arc<Mutex<W>>,
    ) -> Self {
        Self {
            title: title.into(),
            size,
            origin_row: origin_row.max(1),
            ready: AtomicBool::new(false),
            chart: Mutex::new(BarChart::new(grid.0, grid.1)),
            out,
            frames_drawn: AtomicUsize::new(0),
        }
    }

    /// Allow drawing; until now `size()` reports not ready
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn.load(Ordering::Relaxed)
    }

    /// Terminal rows used: the title line plus the chart
    pub fn height_in_rows(&self) -> usize {
        self.chart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .grid()
            .1
            + 1
    }
}

impl<W: Write + Send> RenderSurface for TerminalCanvas<W> {
    fn size(&self) -> Option<SurfaceSize> {
        self.ready.load(Ordering::Acquire).then_some(self.size)
    }

    fn draw(&self, bars: &[u32], layout: &BarLayout) -> SortResult<()> {
        let frame = self
            .chart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .compose(bars, layout);
        let frame_number = self.frames_drawn.fetch_add(1, Ordering::Relaxed) + 1;

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write!(
            out,
            "\x1b[{};1H\x1b[2K{} ({} bars, frame {})",
            self.origin_row,
            self.title,
            bars.len(),
            frame_number
        )?;
        // Full-height regions: only redraw the rows once, but skip clean frames
        if frame.is_dirty() {
            for (offset, line) in frame.content.iter().enumerate() {
                write!(out, "\x1b[{};1H{}", self.origin_row + 1 + offset, line)?;
            }
        } else {
            debug!("{}: frame {} unchanged", self.title, frame_number);
        }
        out.flush()?;
        Ok(())
    }
}
