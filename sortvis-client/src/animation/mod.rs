// Sortvis Client: Animation System
//
// Composes bar heights into character frames and writes them to the
// terminal. Each card gets its own canvas; canvases stack vertically.

pub mod bars;
pub mod canvas;
pub mod engine;

pub use bars::BarChart;
pub use canvas::TerminalCanvas;
pub use engine::{AnimationFrame, DirtyRegion, FrameComposer};
