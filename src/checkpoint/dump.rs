use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::store::{AvgStrategyArray, RegretArray, Store};

/// Writes `<prefix>.regrets` and, when `do_average` is set, `<prefix>.avg-strategy`,
/// one per-round `[type-tag][array]` block each, native byte order. Grounded
/// on `PureCfrMachine::write_dump` in the original's `pure_cfr_machine.cpp`,
/// which likewise skips the average-strategy file entirely when averaging
/// is disabled (spec.md §4.7: the avg-strategy file is written "only when
/// average tracking is on").
pub fn write_dump(store: &Store, prefix: &str, do_average: bool) -> anyhow::Result<()> {
    let mut regrets = BufWriter::new(File::create(format!("{prefix}.regrets"))?);
    for round in &store.rounds {
        round.regret.write(&mut regrets)?;
    }
    if do_average {
        let mut avg = BufWriter::new(File::create(format!("{prefix}.avg-strategy"))?);
        for round in &store.rounds {
            round.avg_strategy.write(&mut avg)?;
        }
    }
    Ok(())
}

/// Loads `<prefix>.regrets` and `<prefix>.avg-strategy` into a freshly
/// sized [`Store`]. A missing average-strategy file is a warning, not a
/// fatal error — the store is left zeroed for it — mirroring
/// `PureCfrMachine::load_dump`'s `-1`/zero-and-warn return for that file
/// specifically; a missing regrets file is fatal.
pub fn load_dump(store: &mut Store, prefix: &str) -> anyhow::Result<()> {
    let mut regrets = BufReader::new(File::open(format!("{prefix}.regrets"))?);
    for (round, slot) in store.rounds.iter_mut().enumerate() {
        slot.regret = RegretArray::load(&mut regrets, slot.total_num_entries, round)?;
    }

    match File::open(format!("{prefix}.avg-strategy")) {
        Ok(file) => {
            let mut avg = BufReader::new(file);
            for (round, slot) in store.rounds.iter_mut().enumerate() {
                slot.avg_strategy = AvgStrategyArray::load(&mut avg, slot.total_num_entries, round)?;
            }
        }
        Err(_) => {
            log::warn!(
                "no average-strategy dump found at {prefix}.avg-strategy; starting its counters from zero"
            );
        }
    }
    Ok(())
}

pub fn dump_exists(prefix: &str) -> bool {
    Path::new(&format!("{prefix}.regrets")).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::{ActionAbstractionKind, CardAbstractionKind};
    use crate::game::GameDef;
    use crate::tree::Tree;

    #[test]
    fn fresh_store_dumps_all_zero() {
        let game = GameDef::toy_one_card();
        let card_abs = CardAbstractionKind::Null;
        let tree = Tree::build(&game, &ActionAbstractionKind::Null).unwrap();
        let store = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);

        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("fresh").to_str().unwrap().to_string();
        write_dump(&store, &prefix, true).unwrap();

        let mut loaded = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);
        load_dump(&mut loaded, &prefix).unwrap();

        for round in &loaded.rounds {
            let (_, sum) = round.regret.positive_values(0, round.total_num_entries as usize);
            assert_eq!(sum, 0);
            let (_, sum) = round.avg_strategy.positive_values(0, round.total_num_entries as usize);
            assert_eq!(sum, 0);
        }
    }

    #[test]
    fn dump_load_round_trips_byte_identical_with_no_intervening_iterations() {
        let game = GameDef::toy_one_card();
        let card_abs = CardAbstractionKind::Null;
        let tree = Tree::build(&game, &ActionAbstractionKind::Null).unwrap();
        let store = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);

        store.rounds[0].regret.update_regret(0, &[17], 0);
        store.rounds[0].avg_strategy.increment(0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("rt").to_str().unwrap().to_string();
        write_dump(&store, &prefix, true).unwrap();

        let mut loaded = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);
        load_dump(&mut loaded, &prefix).unwrap();

        for (a, b) in store.rounds.iter().zip(loaded.rounds.iter()) {
            let (av, _) = a.regret.positive_values(0, a.total_num_entries as usize);
            let (bv, _) = b.regret.positive_values(0, b.total_num_entries as usize);
            assert_eq!(av, bv);
            let (av, _) = a.avg_strategy.positive_values(0, a.total_num_entries as usize);
            let (bv, _) = b.avg_strategy.positive_values(0, b.total_num_entries as usize);
            assert_eq!(av, bv);
        }
    }

    #[test]
    fn load_warns_but_succeeds_when_average_strategy_file_is_missing() {
        let game = GameDef::toy_one_card();
        let card_abs = CardAbstractionKind::Null;
        let tree = Tree::build(&game, &ActionAbstractionKind::Null).unwrap();
        let store = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);

        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("no-avg").to_str().unwrap().to_string();
        let mut regrets = BufWriter::new(File::create(format!("{prefix}.regrets")).unwrap());
        for round in &store.rounds {
            round.regret.write(&mut regrets).unwrap();
        }
        drop(regrets);

        let mut loaded = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);
        assert!(load_dump(&mut loaded, &prefix).is_ok());
    }
}
