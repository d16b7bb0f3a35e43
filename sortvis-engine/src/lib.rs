// Sortvis Engine
//
// Sorting algorithms that pause after every swap, and the hosts that own the
// bars they sort.

pub mod algorithms;
pub mod error;
pub mod host;

pub use algorithms::{create_algorithm, AlgoHost, Algorithm, BarHeights, SortStats};
pub use error::{SortError, SortResult};
pub use host::{
    BarLayout, BoardReport, CardReport, HostState, RefreshOutcome, RenderSurface, SortBoard,
    SortCard, SurfaceSize,
};
