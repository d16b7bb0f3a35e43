// Sortvis Client: vertical bar chart frames
// ▁▂▃▄▅▆▇█ partial blocks give each row eight levels of height

use super::engine::{AnimationFrame, DirtyRegion, FrameComposer};
use sortvis_engine::BarLayout;

/// Bar chart rendered into a fixed character grid.
///
/// Bars are mapped from surface pixels onto grid columns. A bar covers every
/// column its stroke `[x, x + line_width)` touches; when several bars land
/// in one column the tallest wins. Heights are scaled to the grid with
/// eighth-of-a-row resolution.
pub struct BarChart {
    cols: usize,
    rows: usize,
    /// Filled eighths per column in the previous frame
    previous: Option<Vec<usize>>,
}

impl BarChart {
    /// Block characters from empty to full
    const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            previous: None,
        }
    }

    /// Filled eighths for every column
    fn column_levels(&self, bars: &[u32], layout: &BarLayout) -> Vec<usize> {
        let mut levels = vec![0usize; self.cols];
        let width = layout.width.max(1) as usize;
        let height = layout.height.max(1) as usize;
        let max_level = self.rows * 8;
        let cols_per_px = self.cols as f32 / width as f32;

        for (i, &h) in bars.iter().enumerate() {
            let x = layout.x_of(i) as usize;
            if x >= width {
                break;
            }
            let first = (x * self.cols / width).min(self.cols - 1);
            let last = (((x as f32 + layout.line_width) * cols_per_px).ceil() as usize)
                .saturating_sub(1)
                .clamp(first, self.cols - 1);
            let level = (h as usize * max_level / height).min(max_level);
            for col in &mut levels[first..=last] {
                *col = (*col).max(level);
            }
        }
        levels
    }

    fn render_rows(&self, levels: &[usize]) -> Vec<String> {
        (0..self.rows)
            .map(|r| {
                let from_bottom = self.rows - 1 - r;
                levels
                    .iter()
                    .map(|&level| {
                        let filled = level.saturating_sub(from_bottom * 8).min(8);
                        Self::LEVELS[filled]
                    })
                    .collect::<String>()
            })
            .collect()
    }

    /// Runs of columns whose level changed, each spanning the full height
    fn dirty_regions(&self, levels: &[usize]) -> Vec<DirtyRegion> {
        let Some(previous) = &self.previous else {
            return vec![DirtyRegion {
                x: 0,
                y: 0,
                width: self.cols,
                height: self.rows,
            }];
        };

        let mut regions: Vec<DirtyRegion> = Vec::new();
        for (col, (old, new)) in previous.iter().zip(levels).enumerate() {
            if old == new {
                continue;
            }
            if let Some(region) = regions.last_mut().filter(|r| r.x + r.width == col) {
                region.width += 1;
                continue;
            }
            regions.push(DirtyRegion {
                x: col,
                y: 0,
                width: 1,
                height: self.rows,
            });
        }
        regions
    }
}

impl FrameComposer for BarChart {
    fn compose(&mut self, bars: &[u32], layout: &BarLayout) -> AnimationFrame {
        let levels = self.column_levels(bars, layout);
        let content = self.render_rows(&levels);
        let dirty_regions = self.dirty_regions(&levels);
        self.previous = Some(levels);
        AnimationFrame::new(content, dirty_regions)
    }

    fn grid(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four bars, one per column, on a 4x2 grid of a 4x16 px surface
    fn layout() -> BarLayout {
        BarLayout {
            padding: 0,
            spacing: 1,
            line_width: 1.0,
            width: 4,
            height: 16,
        }
    }

    #[test]
    fn test_heights_scale_to_rows() {
        let mut chart = BarChart::new(4, 2);
        let frame = chart.compose(&[16, 8, 4, 0], &layout());

        // 16px → 16 eighths (two full rows), 8px → one row, 4px → half a row
        assert_eq!(frame.content, vec!["█   ", "██▄ "]);
    }

    #[test]
    fn test_first_frame_fully_dirty() {
        let mut chart = BarChart::new(4, 2);
        let frame = chart.compose(&[1, 2, 3, 4], &layout());
        assert_eq!(
            frame.dirty_regions,
            vec![DirtyRegion { x: 0, y: 0, width: 4, height: 2 }]
        );
    }

    #[test]
    fn test_swap_dirties_only_swapped_columns() {
        let mut chart = BarChart::new(4, 2);
        chart.compose(&[4, 8, 12, 16], &layout());

        let frame = chart.compose(&[16, 8, 12, 4], &layout());
        assert_eq!(
            frame.dirty_regions,
            vec![
                DirtyRegion { x: 0, y: 0, width: 1, height: 2 },
                DirtyRegion { x: 3, y: 0, width: 1, height: 2 },
            ]
        );

        let frame = chart.compose(&[16, 12, 8, 4], &layout());
        assert_eq!(
            frame.dirty_regions,
            vec![DirtyRegion { x: 1, y: 0, width: 2, height: 2 }]
        );
    }

    #[test]
    fn test_unchanged_frame_is_clean() {
        let mut chart = BarChart::new(4, 2);
        chart.compose(&[4, 4, 4, 4], &layout());
        assert!(!chart.compose(&[4, 4, 4, 4], &layout()).is_dirty());
    }

    #[test]
    fn test_reset() {
        let mut chart = BarChart::new(4, 2);
        chart.compose(&[4, 4, 4, 4], &layout());
        chart.reset();
        assert!(chart.compose(&[4, 4, 4, 4], &layout()).is_dirty());
    }

    #[test]
    fn test_tallest_bar_wins_shared_column() {
        let mut chart = BarChart::new(2, 1);
        let frame = chart.compose(&[2, 8, 16, 4], &layout());
        // Bars 0,1 share column 0; bars 2,3 share column 1
        assert_eq!(frame.content, vec!["▄█"]);
    }

    #[test]
    fn test_wide_stroke_covers_several_columns() {
        let mut chart = BarChart::new(8, 1);
        let layout = BarLayout {
            padding: 1,
            spacing: 4,
            line_width: 3.0,
            width: 8,
            height: 8,
        };
        // Strokes at x=1..4 and x=5..8
        let frame = chart.compose(&[8, 4], &layout);
        assert_eq!(frame.content, vec![" ███ ▄▄▄"]);
    }

    #[test]
    fn test_grid_width_matches_columns() {
        let mut chart = BarChart::new(40, 6);
        let layout = BarLayout {
            padding: 2,
            spacing: 8,
            line_width: 2.0,
            width: 300,
            height: 260,
        };
        let bars: Vec<u32> = (0..38).map(|i| 130 + i * 3).collect();
        let frame = chart.compose(&bars, &layout);

        assert_eq!(frame.content.len(), 6);
        assert!(frame.content.iter().all(|row| row.chars().count() == 40));
        assert_eq!(chart.grid(), (40, 6));
    }
}
