//! End-to-end exercise of the one-card, two-player toy game: 10 000 Pure
//! CFR iterations should leave every regret counter in signed-32-bit range
//! and should have exercised the average-strategy counters at least once.

use pure_cfr_solver::abstraction::{ActionAbstractionKind, CardAbstractionKind};
use pure_cfr_solver::engine;
use pure_cfr_solver::game::{GameDef, HighCardRanker};
use pure_cfr_solver::hand::Hand;
use pure_cfr_solver::store::Store;
use pure_cfr_solver::tree::Tree;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn ten_thousand_iterations_stay_within_bounds() {
    let game = GameDef::toy_one_card();
    let action_abs = ActionAbstractionKind::Null;
    let card_abs = CardAbstractionKind::Null;
    let tree = Tree::build(&game, &action_abs).unwrap();

    assert!(tree.num_entries_per_bucket[0] <= 20, "preflop N_0 should fit in the toy game's small action set");

    let store = Store::new(&game, &card_abs, &tree.num_entries_per_bucket);
    let ranker = HighCardRanker;
    let mut rng = SmallRng::seed_from_u64(6 + 1234);

    for _ in 0..10_000 {
        let hand = Hand::deal(&game, &ranker, &card_abs, &mut rng);
        for position in 0..game.num_players {
            engine::walk(&tree, tree.root, &hand, position, &store, &mut rng, true).unwrap();
        }
    }

    let round0 = &store.rounds[0];
    let (regret_values, _) = round0.regret.positive_values(0, round0.total_num_entries as usize);
    for v in regret_values {
        assert!(v <= i32::MAX as u64);
    }

    let (_, avg_sum) = round0.avg_strategy.positive_values(0, round0.total_num_entries as usize);
    assert!(avg_sum > 0, "10000 iterations should have incremented some average-strategy counter");
    assert!(avg_sum <= 2 * 10_000, "no counter can be incremented more than once per (iteration, position) pair");
}
