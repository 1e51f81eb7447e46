//! Tournament Branch Predictor.
//!
//! Runs a local predictor (per-PC history into a counter table) and a global
//! predictor (global history into a counter table) side by side. A chooser
//! table, indexed by global history, learns which of the two to trust.
//!
//! A prediction is captured as a [`TournamentLookup`] so the update for a branch
//! touches exactly the entries that produced its prediction.

use super::counter::SaturatingCounter;
use super::history::{HistoryRegister, low_mask, shift_in};
use super::{BranchPredictor, Outcome};
use crate::config::PredictorConfig;

/// Everything a tournament prediction read, kept for the paired update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentLookup {
    /// Branch address the lookup was made for.
    pub pc: u32,
    /// Entry of the local history table selected by the PC.
    pub pht_index: usize,
    /// Local history pattern, used as the local counter index.
    pub local_index: usize,
    /// Global history, used for the global counter and chooser index.
    pub global_index: usize,
    pub local: Outcome,
    pub global: Outcome,
    /// Final prediction after the chooser.
    pub prediction: Outcome,
}

pub struct TournamentPredictor {
    ghr: HistoryRegister,

    global_pht: Vec<SaturatingCounter>,
    global_mask: u32,

    local_history_table: Vec<u32>,
    local_hist_mask: u32,

    local_pht: Vec<SaturatingCounter>,
    local_pred_mask: u32,

    choice_pht: Vec<SaturatingCounter>,

    pending: Option<TournamentLookup>,
}

impl TournamentPredictor {
    pub fn new(config: &PredictorConfig) -> Self {
        let global_size = 1usize << config.ghistory_bits;
        let local_hist_size = 1usize << config.pc_index_bits;
        let local_pred_size = 1usize << config.lhistory_bits;

        log::debug!(
            "tournament: {} global, {} local histories, {} local counters",
            global_size,
            local_hist_size,
            local_pred_size
        );

        Self {
            ghr: HistoryRegister::new(config.ghistory_bits),

            global_pht: vec![SaturatingCounter::WEAKLY_NOT_TAKEN; global_size],
            global_mask: low_mask(config.ghistory_bits),

            local_history_table: vec![0; local_hist_size],
            local_hist_mask: low_mask(config.pc_index_bits),

            local_pht: vec![SaturatingCounter::WEAKLY_NOT_TAKEN; local_pred_size],
            local_pred_mask: low_mask(config.lhistory_bits),

            choice_pht: vec![SaturatingCounter::WEAKLY_NOT_TAKEN; global_size],

            pending: None,
        }
    }

    /// Reads both sub-predictors and the chooser for `pc` without changing state.
    pub fn lookup(&self, pc: u32) -> TournamentLookup {
        let pht_index = (pc & self.local_hist_mask) as usize;
        let local_index = (self.local_history_table[pht_index] & self.local_pred_mask) as usize;
        let local = self.local_pht[local_index].predict();

        let global_index = (self.ghr.value() & self.global_mask) as usize;
        let global = self.global_pht[global_index].predict();

        let prediction = if self.prefers_local(global_index) {
            local
        } else {
            global
        };

        TournamentLookup {
            pc,
            pht_index,
            local_index,
            global_index,
            local,
            global,
            prediction,
        }
    }

    /// Applies the resolved `outcome` to the entries named by `lookup`.
    pub fn resolve(&mut self, lookup: &TournamentLookup, outcome: Outcome) {
        let global_correct = lookup.global == outcome;
        let local_correct = lookup.local == outcome;

        // The chooser only moves when exactly one side was right.
        let choice = &mut self.choice_pht[lookup.global_index];
        if global_correct && !local_correct {
            choice.decrement();
        } else if local_correct && !global_correct {
            choice.increment();
        }

        self.global_pht[lookup.global_index].update(outcome);
        self.local_pht[lookup.local_index].update(outcome);

        let pattern = &mut self.local_history_table[lookup.pht_index];
        *pattern = shift_in(*pattern, outcome, self.local_pred_mask);
        self.ghr.push(outcome);
    }

    /// A chooser value above 1 selects the local predictor.
    fn prefers_local(&self, global_index: usize) -> bool {
        self.choice_pht[global_index].value() > 1
    }

    pub fn chooser(&self, global_index: usize) -> SaturatingCounter {
        self.choice_pht[global_index]
    }

    pub fn global_counter(&self, index: usize) -> SaturatingCounter {
        self.global_pht[index]
    }

    pub fn local_counter(&self, index: usize) -> SaturatingCounter {
        self.local_pht[index]
    }

    pub fn local_history(&self, pht_index: usize) -> u32 {
        self.local_history_table[pht_index]
    }

    pub fn history(&self) -> u32 {
        self.ghr.value()
    }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str {
        "Tournament"
    }

    fn predict(&mut self, pc: u32) -> Outcome {
        let lookup = self.lookup(pc);
        self.pending = Some(lookup);
        lookup.prediction
    }

    fn train(&mut self, pc: u32, outcome: Outcome) {
        let lookup = match self.pending.take() {
            Some(lookup) if lookup.pc == pc => lookup,
            Some(stale) => {
                log::warn!(
                    "tournament: train for pc {:#x} follows predict for pc {:#x}; recomputing lookup",
                    pc,
                    stale.pc
                );
                self.lookup(pc)
            }
            None => {
                log::warn!(
                    "tournament: train for pc {:#x} without a prior predict; recomputing lookup",
                    pc
                );
                self.lookup(pc)
            }
        };
        self.resolve(&lookup, outcome);
    }

    fn storage_bits(&self) -> usize {
        let counters = self.global_pht.len() + self.local_pht.len() + self.choice_pht.len();
        counters * SaturatingCounter::BITS
            + self.local_history_table.len() * self.local_pred_mask.count_ones() as usize
            + self.ghr.width() as usize
    }
}
