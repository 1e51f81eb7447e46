//! Branch direction predictors.

pub use self::branch_predictor::{BranchPredictor, Outcome};

pub mod branch_predictor;
pub mod counter;
pub mod gshare;
pub mod history;
pub mod perceptron;
pub mod static_bp;
pub mod tournament;

use crate::config::{BpType, PredictorConfig};
use crate::error::ConfigError;

/// Validates `config` and allocates the selected predictor.
///
/// Only the tables of the chosen variant are allocated.
pub fn build(config: &PredictorConfig) -> Result<Box<dyn BranchPredictor>, ConfigError> {
    config.validate()?;

    let bp: Box<dyn BranchPredictor> = match config.bp_type {
        BpType::Static => Box::new(static_bp::StaticPredictor::new()),
        BpType::Gshare => Box::new(gshare::GSharePredictor::new(config.ghistory_bits)),
        BpType::Tournament => Box::new(tournament::TournamentPredictor::new(config)),
        BpType::Custom => Box::new(perceptron::PerceptronPredictor::new(&config.perceptron)),
    };
    log::debug!("built {} predictor ({} bits of state)", bp.name(), bp.storage_bits());
    Ok(bp)
}
