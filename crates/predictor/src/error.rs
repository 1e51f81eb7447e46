//! Error types for predictor configuration and trace input.

use std::fmt;
use std::io;

/// Errors raised while building a predictor configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A table width is outside the supported range.
    WidthOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was supplied.
        value: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// The perceptron history length is outside the supported range.
    HistoryLengthOutOfRange {
        /// The value that was supplied.
        value: usize,
        /// Largest accepted value.
        max: usize,
    },

    /// The predictor name in a spec string is not recognised.
    UnknownPredictor(String),

    /// A predictor spec string could not be parsed.
    InvalidSpec {
        /// The input string.
        spec: String,
        /// Human-readable description of what went wrong.
        reason: String,
    },

    /// The configuration file could not be read.
    Io(io::Error),

    /// The configuration file is not valid JSON for a [`crate::PredictorConfig`].
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WidthOutOfRange { field, value, max } => {
                write!(f, "{field} must be between 1 and {max}, got {value}")
            }
            ConfigError::HistoryLengthOutOfRange { value, max } => {
                write!(
                    f,
                    "perceptron history_length must be between 1 and {max}, got {value}"
                )
            }
            ConfigError::UnknownPredictor(name) => write!(
                f,
                "unknown predictor '{name}' (expected static, gshare, tournament or custom)"
            ),
            ConfigError::InvalidSpec { spec, reason } => {
                write!(f, "invalid predictor spec '{spec}': {reason}")
            }
            ConfigError::Io(e) => write!(f, "could not read config: {e}"),
            ConfigError::Parse(e) => write!(f, "could not parse config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors raised while reading a branch trace.
#[derive(Debug)]
pub enum TraceError {
    /// The underlying reader failed.
    Io(io::Error),

    /// A trace line is malformed.
    Parse {
        /// 1-based line number in the trace.
        line: usize,
        /// Human-readable description of what went wrong.
        reason: String,
    },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(e) => write!(f, "trace read failed: {e}"),
            TraceError::Parse { line, reason } => write!(f, "trace line {line}: {reason}"),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(e) => Some(e),
            TraceError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for TraceError {
    fn from(e: io::Error) -> Self {
        TraceError::Io(e)
    }
}
