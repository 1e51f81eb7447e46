//! Trace replay.
//!
//! Drives a predictor through a stream of resolved branches, strictly
//! alternating `predict` and `train` for each one.

use crate::bp::{BranchPredictor, Outcome};
use crate::stats::SimStats;
use crate::trace::BranchRecord;

/// Replays `records` through `bp` and returns the aggregate statistics.
///
/// `observer` sees every record together with the prediction made for it,
/// before the predictor is trained. The first error from `records` stops the
/// replay and is returned.
pub fn run<I, E, F>(
    bp: &mut dyn BranchPredictor,
    records: I,
    mut observer: F,
) -> Result<SimStats, E>
where
    I: IntoIterator<Item = Result<BranchRecord, E>>,
    F: FnMut(&BranchRecord, Outcome),
{
    let mut stats = SimStats {
        predictor: bp.name().to_string(),
        storage_bits: bp.storage_bits(),
        ..SimStats::default()
    };

    for record in records {
        let record = record?;
        let prediction = bp.predict(record.pc);
        log::trace!("{} predicted {}", record, prediction);
        observer(&record, prediction);

        stats.record(prediction == record.outcome);
        bp.train(record.pc, record.outcome);
    }

    Ok(stats)
}
