// Sortvis Client: frame composition trait and core types
use std::time::Instant;

use sortvis_engine::BarLayout;

/// Defines a rectangular region that needs to be redrawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyRegion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Represents a single frame of animation with dirty regions
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    /// The rendered rows for this frame, top to bottom
    pub content: Vec<String>,
    /// Regions that changed from the previous frame
    pub dirty_regions: Vec<DirtyRegion>,
    /// When the frame was composed
    pub timestamp: Instant,
}

impl AnimationFrame {
    pub fn new(content: Vec<String>, dirty_regions: Vec<DirtyRegion>) -> Self {
        Self {
            content,
            dirty_regions,
            timestamp: Instant::now(),
        }
    }

    /// Whether anything changed since the previous frame
    pub fn is_dirty(&self) -> bool {
        !self.dirty_regions.is_empty()
    }
}

/// Turns bar heights into character frames
pub trait FrameComposer: Send {
    /// Compose the frame for the given bars
    fn compose(&mut self, bars: &[u32], layout: &BarLayout) -> AnimationFrame;

    /// Grid size in (columns, rows)
    fn grid(&self) -> (usize, usize);

    /// Forget the previous frame so the next one is fully dirty
    fn reset(&mut self);
}
