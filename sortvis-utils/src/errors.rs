// Sortvis Utils - Configuration Errors
//
// Errors surfaced while selecting an algorithm or loading visualizer settings.
// These are caught at the boundary, never inside a running sort.

use std::io;

/// Errors that can occur while reading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Algorithm key is not one of the five known sorts
    #[error("Unknown algorithm '{0}' (expected one of: quickSort, shellSort, insertionSort, selectionSort, bubbleSort)")]
    UnknownAlgorithm(String),

    /// A min/default/max triple is inconsistent
    #[error("Invalid {name} range: min={min}, default={default}, max={max}")]
    InvalidRange {
        name: &'static str,
        min: u32,
        default: u32,
        max: u32,
    },

    /// A value that must be non-zero was zero
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// Config file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid JSON for the expected shape
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnknownAlgorithm("bogoSort".to_string());
        assert!(err.to_string().contains("bogoSort"));
        assert!(err.to_string().contains("quickSort"));

        let err = ConfigError::InvalidRange {
            name: "density",
            min: 30,
            default: 8,
            max: 3,
        };
        assert!(err.to_string().contains("density"));
        assert!(err.to_string().contains("min=30"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
