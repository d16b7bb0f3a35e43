// Sortvis Utils
//
// Plain data shared by the engine, the terminal client and the CLI:
// algorithm identities, visualizer constants and the live settings object.

pub mod algorithm;
pub mod errors;
pub mod settings;

pub use algorithm::{format_algo_name, AlgorithmKey};
pub use errors::{ConfigError, ConfigResult};
pub use settings::{
    BarConfig, CanvasConfig, DensityConfig, SortingSettings, SpeedConfig, VisualizerConfig,
};
