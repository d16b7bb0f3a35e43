// Sortvis Host - Render Surface
//
// What a host needs from the thing it draws on. Terminal, canvas and test
// surfaces all implement this.

use crate::error::SortResult;

/// Pixel size of a drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Horizontal placement of bars on a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    /// Offset of the first bar and of every bar's top edge
    pub padding: u32,
    /// Distance between consecutive bars
    pub spacing: u32,
    /// Stroke width of each bar; a bar spans `[x, x + line_width)`
    pub line_width: f32,
    /// Width the bars were generated for, never below the configured minimum
    pub width: u32,
    pub height: u32,
}

impl BarLayout {
    /// X coordinate of bar `index`
    pub fn x_of(&self, index: usize) -> u32 {
        self.padding + self.spacing * index as u32
    }
}

/// A surface that can show a sequence of bar heights.
pub trait RenderSurface: Send + Sync {
    /// Current size, or `None` until the surface is ready to be drawn on
    fn size(&self) -> Option<SurfaceSize>;

    /// Clear and redraw every bar
    fn draw(&self, bars: &[u32], layout: &BarLayout) -> SortResult<()>;
}
