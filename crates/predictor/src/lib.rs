//! Conditional branch direction predictor models.
//!
//! The crate is organised around the [`bp::BranchPredictor`] trait, which every
//! predictor variant implements:
//!
//! - [`bp::static_bp::StaticPredictor`]: always predicts taken.
//! - [`bp::gshare::GSharePredictor`]: PC xor global history into 2-bit counters.
//! - [`bp::tournament::TournamentPredictor`]: local and global predictors with a chooser.
//! - [`bp::perceptron::PerceptronPredictor`]: a table of perceptrons over global history.
//!
//! The remaining modules are the collaborators that feed a predictor: trace
//! parsing ([`trace`]), configuration ([`config`]), and the replay loop with its
//! statistics ([`sim`], [`stats`]).

pub mod bp;
pub mod config;
pub mod error;
pub mod sim;
pub mod stats;
pub mod trace;

pub use bp::{BranchPredictor, Outcome};
pub use config::{BpType, PerceptronConfig, PredictorConfig};
pub use error::{ConfigError, TraceError};
pub use stats::SimStats;
pub use trace::{BranchRecord, TraceReader};
