use super::{BranchPredictor, Outcome};

/// Always predicts taken and keeps no state.
#[derive(Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn name(&self) -> &'static str {
        "Static"
    }

    fn predict(&mut self, _pc: u32) -> Outcome {
        Outcome::Taken
    }

    fn train(&mut self, _pc: u32, _outcome: Outcome) {}

    fn storage_bits(&self) -> usize {
        0
    }
}
