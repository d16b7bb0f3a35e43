pub mod animation;

pub use animation::{BarChart, TerminalCanvas};
