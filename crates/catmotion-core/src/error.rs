//! Error types for configuration and scene loading.
//!
//! The animation itself never fails; only the edges that parse and validate
//! user-supplied parameters can.

use thiserror::Error;

/// Errors from validating body parameters or loading a scene file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric parameter was NaN or infinite.
    #[error("Parameter '{0}' must be finite")]
    NonFinite(&'static str),

    /// A parameter that must be strictly positive was not.
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    /// A parameter that must not be negative was.
    #[error("Parameter '{name}' must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    /// A `[min, max]` pair was inverted.
    #[error("Range '{name}' is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// A probability was outside `[0, 1]`.
    #[error("Probability '{name}' must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    /// A finite parameter beyond what the animation can use.
    #[error("Parameter '{name}' is out of range, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    /// A range whose width overflows and so cannot be sampled.
    #[error("Range '{0}' is too wide to sample")]
    Unsampleable(&'static str),

    /// Scene-level validation failure (frame counts, cue ordering).
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// Scene JSON could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Scene file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NonFinite(_) => "CONFIG_001",
            ConfigError::NotPositive { .. } => "CONFIG_002",
            ConfigError::Negative { .. } => "CONFIG_003",
            ConfigError::InvertedRange { .. } => "CONFIG_004",
            ConfigError::Probability { .. } => "CONFIG_005",
            ConfigError::InvalidScene(_) => "CONFIG_006",
            ConfigError::Parse(_) => "CONFIG_007",
            ConfigError::Io(_) => "CONFIG_008",
            ConfigError::OutOfRange { .. } => "CONFIG_009",
            ConfigError::Unsampleable(_) => "CONFIG_010",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_and_code() {
        let err = ConfigError::InvertedRange {
            name: "joint_limits",
            min: 30.0,
            max: -30.0,
        };
        assert_eq!(err.code(), "CONFIG_004");
        assert_eq!(
            err.to_string(),
            "Range 'joint_limits' is inverted: min 30 > max -30"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = parse.into();
        assert_eq!(err.code(), "CONFIG_007");
    }
}
