//! # Tournament Tests

use bpsim::bp::tournament::{TournamentLookup, TournamentPredictor};
use bpsim::config::PredictorConfig;
use bpsim::{BranchPredictor, Outcome};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn create_predictor(ghistory: u32, lhistory: u32, pc_index: u32) -> TournamentPredictor {
    TournamentPredictor::new(&PredictorConfig::tournament(ghistory, lhistory, pc_index))
}

#[test]
fn test_initial_lookup() {
    let bp = create_predictor(4, 3, 2);
    let lookup = bp.lookup(0x7);

    assert_eq!(
        lookup,
        TournamentLookup {
            pc: 0x7,
            pht_index: 0x3,
            local_index: 0,
            global_index: 0,
            local: Outcome::NotTaken,
            global: Outcome::NotTaken,
            prediction: Outcome::NotTaken,
        }
    );
    assert_eq!(bp.chooser(0).value(), 1);
}

#[test]
fn test_train_updates_looked_up_entries() {
    let mut bp = create_predictor(4, 3, 2);
    assert_eq!(bp.predict(0x5), Outcome::NotTaken);
    bp.train(0x5, Outcome::Taken);

    assert_eq!(bp.global_counter(0).value(), 2);
    assert_eq!(bp.local_counter(0).value(), 2);
    assert_eq!(bp.local_history(0x1), 0b1);
    assert_eq!(bp.history(), 0b1);
    // Both sides were wrong, so the chooser stays put.
    assert_eq!(bp.chooser(0).value(), 1);
}

#[test]
fn test_local_history_masked_to_lhistory_bits() {
    let mut bp = create_predictor(4, 2, 2);
    for _ in 0..6 {
        bp.predict(0x1);
        bp.train(0x1, Outcome::Taken);
    }
    assert_eq!(bp.local_history(0x1), 0b11);
    assert_eq!(bp.lookup(0x1).local_index, 0b11);
}

fn forced(
    pht_index: usize,
    local_index: usize,
    global_index: usize,
    local: Outcome,
    global: Outcome,
) -> TournamentLookup {
    TournamentLookup {
        pc: pht_index as u32,
        pht_index,
        local_index,
        global_index,
        local,
        global,
        prediction: global,
    }
}

#[test]
fn test_chooser_moves_towards_the_correct_side() {
    let mut bp = create_predictor(2, 2, 2);
    let lookup = forced(0, 0, 0, Outcome::Taken, Outcome::NotTaken);

    bp.resolve(&lookup, Outcome::Taken);
    assert_eq!(bp.chooser(0).value(), 2);

    bp.resolve(&lookup, Outcome::NotTaken);
    assert_eq!(bp.chooser(0).value(), 1);
    bp.resolve(&lookup, Outcome::NotTaken);
    bp.resolve(&lookup, Outcome::NotTaken);
    assert_eq!(bp.chooser(0).value(), 0);
}

#[test]
fn test_chooser_selects_local_above_one() {
    let mut bp = create_predictor(2, 2, 2);

    // chooser[0] -> 2, global[0] -> 2, local[1] -> 2, local history of pc 1 -> 0b1
    bp.resolve(&forced(1, 1, 0, Outcome::Taken, Outcome::NotTaken), Outcome::Taken);
    // Both sides agree: chooser[0] stays, global[0] -> 1
    bp.resolve(&forced(2, 2, 0, Outcome::NotTaken, Outcome::NotTaken), Outcome::NotTaken);
    // Clear the global history back to 0.
    bp.resolve(&forced(3, 3, 3, Outcome::NotTaken, Outcome::NotTaken), Outcome::NotTaken);
    assert_eq!(bp.history(), 0);

    let lookup = bp.lookup(0x1);
    assert_eq!(lookup.global_index, 0);
    assert_eq!(lookup.local_index, 1);
    assert_eq!(bp.chooser(0).value(), 2);
    assert_eq!(lookup.global, Outcome::NotTaken);
    assert_eq!(lookup.local, Outcome::Taken);
    assert_eq!(lookup.prediction, Outcome::Taken);
}

#[test]
fn test_chooser_at_one_selects_global() {
    let mut bp = create_predictor(2, 2, 2);
    bp.resolve(&forced(0, 3, 1, Outcome::NotTaken, Outcome::NotTaken), Outcome::Taken);
    bp.resolve(&forced(0, 3, 1, Outcome::NotTaken, Outcome::NotTaken), Outcome::Taken);
    bp.resolve(&forced(3, 2, 3, Outcome::NotTaken, Outcome::NotTaken), Outcome::NotTaken);
    bp.resolve(&forced(3, 2, 3, Outcome::NotTaken, Outcome::NotTaken), Outcome::NotTaken);

    // Local history of pc 0 is 0b11 and local[3] is strongly taken; global[0] is untouched.
    let lookup = bp.lookup(0x0);
    assert_eq!(lookup.global_index, 0);
    assert_eq!(bp.chooser(0).value(), 1);
    assert_eq!(lookup.local_index, 0b11);
    assert_eq!(lookup.local, Outcome::Taken);
    assert_eq!(lookup.prediction, lookup.global);
    assert_eq!(lookup.prediction, Outcome::NotTaken);
}

#[test]
fn test_mismatched_train_uses_trained_pc() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut paired = create_predictor(3, 3, 3);
    let mut mismatched = create_predictor(3, 3, 3);
    for (pc, outcome) in [(0x1, Outcome::Taken), (0x2, Outcome::NotTaken), (0x1, Outcome::Taken)] {
        paired.predict(pc);
        paired.train(pc, outcome);
        mismatched.predict(pc);
        mismatched.train(pc, outcome);
    }

    paired.predict(0x6);
    paired.train(0x6, Outcome::Taken);
    mismatched.predict(0x3);
    mismatched.train(0x6, Outcome::Taken);

    // Train without any predict at all.
    paired.predict(0x6);
    paired.train(0x6, Outcome::Taken);
    mismatched.train(0x6, Outcome::Taken);

    assert_eq!(mismatched.history(), paired.history());
    for pc in 0..8 {
        assert_eq!(mismatched.lookup(pc), paired.lookup(pc));
        assert_eq!(mismatched.local_history(pc as usize), paired.local_history(pc as usize));
    }
}

#[test]
fn test_storage_bits() {
    let bp = create_predictor(9, 10, 10);
    let counters = 512 + 1024 + 512;
    assert_eq!(bp.storage_bits(), counters * 2 + 1024 * 10 + 9);
}

proptest! {
    #[test]
    fn prop_chooser_unchanged_when_sides_agree(
        branches in prop::collection::vec((0u32..256, any::<bool>()), 1..400)
    ) {
        let mut bp = create_predictor(4, 4, 3);
        for (pc, taken) in branches {
            let outcome = Outcome::from(taken);
            let lookup = bp.lookup(pc);
            let before = bp.chooser(lookup.global_index).value();

            prop_assert_eq!(bp.predict(pc), lookup.prediction);
            bp.train(pc, outcome);
            let after = bp.chooser(lookup.global_index).value();

            let global_right = lookup.global == outcome;
            let local_right = lookup.local == outcome;
            if lookup.local == lookup.global {
                prop_assert_eq!(after, before);
            } else if global_right && !local_right {
                prop_assert_eq!(after, before.saturating_sub(1));
            } else {
                prop_assert_eq!(after, (before + 1).min(3));
            }
        }
    }

    #[test]
    fn prop_counters_stay_in_range(
        branches in prop::collection::vec((any::<u32>(), any::<bool>()), 1..300)
    ) {
        let mut bp = create_predictor(3, 3, 3);
        for (pc, taken) in branches {
            bp.predict(pc);
            bp.train(pc, Outcome::from(taken));
        }
        for i in 0..8 {
            prop_assert!(bp.global_counter(i).value() <= 3);
            prop_assert!(bp.local_counter(i).value() <= 3);
            prop_assert!(bp.chooser(i).value() <= 3);
        }
    }
}
