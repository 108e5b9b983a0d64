//! End-to-end exercise of three-player Kuhn poker: terminal payouts must
//! match a direct computation from `spent[]` and rank, and over enough
//! dealt hands every one of the seven leaf types should appear with a
//! `pot_frac_recip` matching the table this crate bakes `Hand::eval` from.

use pure_cfr_solver::abstraction::{ActionAbstractionKind, CardAbstractionKind};
use pure_cfr_solver::engine;
use pure_cfr_solver::game::{GameDef, HighCardRanker, Ranker};
use pure_cfr_solver::hand::{Eval, Hand, NO_SHARE};
use pure_cfr_solver::store::Store;
use pure_cfr_solver::tree::{LeafType, Tree};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Recomputes `pot_frac_recip[player][leaf]` directly from ranks, independent
/// of `Hand::deal`'s own bookkeeping, so the two can be compared.
fn expected_pot_frac_recip(leaf: LeafType, ranks: &[u32; 3]) -> [u32; 3] {
    let mut recip = [NO_SHARE; 3];
    let survivors = leaf.survivors();
    if survivors.len() == 1 {
        recip[survivors[0]] = 1;
        return recip;
    }
    let top = survivors.iter().map(|&p| ranks[p]).max().unwrap();
    let winners: Vec<usize> = survivors.iter().copied().filter(|&p| ranks[p] == top).collect();
    for &p in &survivors {
        recip[p] = if ranks[p] == top { winners.len() as u32 } else { NO_SHARE };
    }
    recip
}

#[test]
fn terminal_payouts_match_direct_spent_and_rank_computation() {
    let game = GameDef::toy_kuhn3();
    let action_abs = ActionAbstractionKind::Fcpa;
    let card_abs = CardAbstractionKind::Null;
    let tree = Tree::build(&game, &action_abs).unwrap();
    let store = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);
    let ranker = HighCardRanker;
    let mut rng = SmallRng::seed_from_u64(99);

    let mut seen_leaf_types = std::collections::HashSet::new();

    for _ in 0..1_000 {
        let hand = Hand::deal(&game, &ranker, &card_abs, &mut rng);
        let ranks = [
            ranker.rank(&game, &hand.hole[0], &hand.board),
            ranker.rank(&game, &hand.hole[1], &hand.board),
            ranker.rank(&game, &hand.hole[2], &hand.board),
        ];

        let Eval::ThreePlayer { pot_frac_recip } = &hand.eval else {
            panic!("three-player game must produce a ThreePlayer evaluation");
        };
        for &leaf in &LeafType::ALL {
            let expected = expected_pot_frac_recip(leaf, &ranks);
            for p in 0..3 {
                assert_eq!(
                    pot_frac_recip[p][leaf as usize], expected[p],
                    "leaf {leaf:?} player {p} ranks {ranks:?}"
                );
            }
            seen_leaf_types.insert(leaf as usize);
        }

        for position in 0..game.num_players {
            engine::walk(&tree, tree.root, &hand, position, &store, &mut rng, false).unwrap();
        }
    }

    assert_eq!(seen_leaf_types.len(), 7, "every leaf type should have been checked at least once");
}
