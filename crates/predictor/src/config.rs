//! Predictor configuration.
//!
//! A [`PredictorConfig`] selects one predictor variant and the widths of its
//! tables. It can be deserialized from JSON, or built from the compact spec
//! strings used on the command line (`gshare:13`, `tournament:9:10:10`).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Largest accepted width for any index or history register.
pub const MAX_TABLE_BITS: u32 = 24;
/// Largest accepted perceptron history length.
pub const MAX_PERCEPTRON_HISTORY: usize = 128;
/// Largest accepted perceptron index width. With the longest history a full
/// table is `2^16` rows of 129 weights, about 8 MiB.
pub const MAX_PERCEPTRON_PC_BITS: u32 = 16;

/// The predictor variant to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BpType {
    #[default]
    Static,
    Gshare,
    Tournament,
    /// Perceptron predictor.
    Custom,
}

impl BpType {
    pub fn name(self) -> &'static str {
        match self {
            BpType::Static => "Static",
            BpType::Gshare => "Gshare",
            BpType::Tournament => "Tournament",
            BpType::Custom => "Custom",
        }
    }
}

impl fmt::Display for BpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BpType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(BpType::Static),
            "gshare" => Ok(BpType::Gshare),
            "tournament" => Ok(BpType::Tournament),
            "custom" | "perceptron" => Ok(BpType::Custom),
            _ => Err(ConfigError::UnknownPredictor(s.to_string())),
        }
    }
}

/// Perceptron sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptronConfig {
    /// Number of history outcomes fed to each perceptron (N).
    pub history_length: usize,
    /// Width of the PC hash selecting a perceptron; the table holds `2^pc_bits` rows.
    pub pc_bits: u32,
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            history_length: 30,
            pc_bits: 8,
        }
    }
}

/// Full predictor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub bp_type: BpType,
    /// Global history width; also sizes the global counter and chooser tables.
    pub ghistory_bits: u32,
    /// Local history width; sizes the local counter table.
    pub lhistory_bits: u32,
    /// PC bits selecting a local history entry.
    pub pc_index_bits: u32,
    pub perceptron: PerceptronConfig,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            bp_type: BpType::Static,
            ghistory_bits: 14,
            lhistory_bits: 10,
            pc_index_bits: 10,
            perceptron: PerceptronConfig::default(),
        }
    }
}

impl PredictorConfig {
    /// Convenience constructor for a gshare configuration.
    pub fn gshare(ghistory_bits: u32) -> Self {
        Self {
            bp_type: BpType::Gshare,
            ghistory_bits,
            ..Self::default()
        }
    }

    /// Convenience constructor for a tournament configuration.
    pub fn tournament(ghistory_bits: u32, lhistory_bits: u32, pc_index_bits: u32) -> Self {
        Self {
            bp_type: BpType::Tournament,
            ghistory_bits,
            lhistory_bits,
            pc_index_bits,
            ..Self::default()
        }
    }

    /// Convenience constructor for a perceptron configuration.
    pub fn custom(history_length: usize, pc_bits: u32) -> Self {
        Self {
            bp_type: BpType::Custom,
            perceptron: PerceptronConfig {
                history_length,
                pc_bits,
            },
            ..Self::default()
        }
    }

    /// Reads a JSON configuration file without validating it, so that a
    /// spec string can still override its widths. Missing fields take their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides the variant and widths from a spec string such as
    /// `static`, `gshare:13`, `tournament:9:10:10` or `custom`.
    ///
    /// Widths omitted from the spec keep their current values.
    pub fn apply_spec(&mut self, spec: &str) -> Result<(), ConfigError> {
        let mut parts = spec.trim().split(':');
        let name = parts.next().unwrap_or_default();
        let bp_type: BpType = name.parse()?;

        let widths = parts
            .map(|p| {
                p.trim().parse::<u32>().map_err(|e| ConfigError::InvalidSpec {
                    spec: spec.to_string(),
                    reason: format!("'{p}' is not a width: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let accepted = match bp_type {
            BpType::Static | BpType::Custom => 0,
            BpType::Gshare => 1,
            BpType::Tournament => 3,
        };
        if !widths.is_empty() && widths.len() != accepted {
            return Err(ConfigError::InvalidSpec {
                spec: spec.to_string(),
                reason: format!(
                    "{} takes {} width(s), got {}",
                    bp_type,
                    accepted,
                    widths.len()
                ),
            });
        }

        self.bp_type = bp_type;
        match (bp_type, widths.as_slice()) {
            (BpType::Gshare, [g]) => self.ghistory_bits = *g,
            (BpType::Tournament, [g, l, p]) => {
                self.ghistory_bits = *g;
                self.lhistory_bits = *l;
                self.pc_index_bits = *p;
            }
            _ => {}
        }
        Ok(())
    }

    /// Checks the widths used by the selected variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.bp_type {
            BpType::Static => Ok(()),
            BpType::Gshare => check_width("ghistory_bits", self.ghistory_bits, MAX_TABLE_BITS),
            BpType::Tournament => {
                check_width("ghistory_bits", self.ghistory_bits, MAX_TABLE_BITS)?;
                check_width("lhistory_bits", self.lhistory_bits, MAX_TABLE_BITS)?;
                check_width("pc_index_bits", self.pc_index_bits, MAX_TABLE_BITS)
            }
            BpType::Custom => {
                let len = self.perceptron.history_length;
                if len == 0 || len > MAX_PERCEPTRON_HISTORY {
                    return Err(ConfigError::HistoryLengthOutOfRange {
                        value: len,
                        max: MAX_PERCEPTRON_HISTORY,
                    });
                }
                check_width(
                    "perceptron.pc_bits",
                    self.perceptron.pc_bits,
                    MAX_PERCEPTRON_PC_BITS,
                )
            }
        }
    }
}

impl FromStr for PredictorConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = PredictorConfig::default();
        config.apply_spec(s)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_width(field: &'static str, value: u32, max: u32) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        Err(ConfigError::WidthOutOfRange { field, value, max })
    } else {
        Ok(())
    }
}
