//! GShare Branch Predictor.
//!
//! Hashes the branch address with the global history register and uses the
//! result to select a 2-bit saturating counter.

use super::counter::SaturatingCounter;
use super::history::{HistoryRegister, low_mask};
use super::{BranchPredictor, Outcome};

pub struct GSharePredictor {
    ghr: HistoryRegister,
    pht: Vec<SaturatingCounter>,
    mask: u32,
}

impl GSharePredictor {
    pub fn new(ghistory_bits: u32) -> Self {
        let size = 1usize << ghistory_bits;
        log::debug!("gshare: {} counters, {} history bits", size, ghistory_bits);

        Self {
            ghr: HistoryRegister::new(ghistory_bits),
            // Initialize to Strongly Not Taken
            pht: vec![SaturatingCounter::STRONGLY_NOT_TAKEN; size],
            mask: low_mask(ghistory_bits),
        }
    }

    /// GShare Index = (PC ^ GlobalHistory) & mask
    pub fn index(&self, pc: u32) -> usize {
        ((pc & self.mask) ^ (self.ghr.value() & self.mask)) as usize
    }

    pub fn counter(&self, index: usize) -> SaturatingCounter {
        self.pht[index]
    }

    pub fn history(&self) -> u32 {
        self.ghr.value()
    }
}

impl BranchPredictor for GSharePredictor {
    fn name(&self) -> &'static str {
        "Gshare"
    }

    fn predict(&mut self, pc: u32) -> Outcome {
        self.pht[self.index(pc)].predict()
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        let idx = self.index(pc);
        self.pht[idx].update(outcome);
        self.ghr.push(outcome);
    }

    fn storage_bits(&self) -> usize {
        self.pht.len() * SaturatingCounter::BITS + self.ghr.width() as usize
    }
}
