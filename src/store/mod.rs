//! The packed entry store: per-round flat arrays of regret and
//! average-strategy counters indexed by `(bucket, soln_idx)`. Grounded on
//! `Entries`/`Entries_der<T>` in the original's `entries.hpp`/`.cpp`.

mod borrowed;
mod entry;
mod layout;

pub use borrowed::BorrowedStore;
pub use entry::{AvgStrategyArray, Overflow, RegretArray};
pub use layout::{EntryType, AVG_STRATEGY_TYPES, REGRET_TYPES};

use crate::abstraction::CardAbstractionKind;
use crate::game::{GameDef, R_MAX};

/// `bucket * num_entries_per_bucket + soln_idx`, the packed index into a
/// round's flat array. Mirrors `Entries::get_entry_index` exactly.
pub fn entry_index(bucket: u64, soln_idx: u64, num_entries_per_bucket: u64) -> usize {
    (bucket * num_entries_per_bucket + soln_idx) as usize
}

/// One round's regret and average-strategy arrays, sized from the betting
/// tree's `N_r` (entries per bucket) and the card abstraction's `B_r`
/// (bucket count).
pub struct Round {
    pub num_entries_per_bucket: u64,
    pub total_num_entries: u64,
    pub regret: RegretArray,
    pub avg_strategy: AvgStrategyArray,
}

pub struct Store {
    pub rounds: Vec<Round>,
}

impl Store {
    pub fn new(
        game: &GameDef,
        card_abs: &CardAbstractionKind,
        num_entries_per_bucket: &[u64; R_MAX],
    ) -> Store {
        let rounds = (0..game.num_rounds)
            .map(|r| {
                let buckets = card_abs.num_buckets(game, r);
                let n_r = num_entries_per_bucket[r];
                let total = buckets * n_r;
                Round {
                    num_entries_per_bucket: n_r,
                    total_num_entries: total,
                    regret: RegretArray::new(total),
                    avg_strategy: AvgStrategyArray::new(r, total),
                }
            })
            .collect();
        Store { rounds }
    }

    pub fn total_entries_per_round(&self) -> Vec<u64> {
        self.rounds.iter().map(|r| r.total_num_entries).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameDef;

    #[test]
    fn entry_index_is_disjoint_across_buckets() {
        let n_r = 5;
        assert_eq!(entry_index(0, 0, n_r), 0);
        assert_eq!(entry_index(0, 4, n_r), 4);
        assert_eq!(entry_index(1, 0, n_r), 5);
        assert_eq!(entry_index(2, 3, n_r), 13);
    }

    #[test]
    fn store_new_sizes_rounds_from_tree_and_abstraction() {
        let game = GameDef::toy_one_card();
        let card_abs = CardAbstractionKind::Null;
        let mut n_r = [0u64; R_MAX];
        n_r[0] = 3;

        let store = Store::new(&game, &card_abs, &n_r);
        assert_eq!(store.rounds.len(), game.num_rounds);

        let expected_buckets = card_abs.num_buckets(&game, 0);
        assert_eq!(store.rounds[0].num_entries_per_bucket, 3);
        assert_eq!(store.rounds[0].total_num_entries, expected_buckets * 3);
        assert_eq!(store.total_entries_per_round(), vec![expected_buckets * 3]);
    }

    #[test]
    fn blind_abstraction_collapses_to_one_bucket_per_round() {
        let game = GameDef::toy_one_card();
        let card_abs = CardAbstractionKind::Blind;
        let mut n_r = [0u64; R_MAX];
        n_r[0] = 7;

        let store = Store::new(&game, &card_abs, &n_r);
        assert_eq!(store.rounds[0].total_num_entries, 7);
    }
}
