//! The Pure CFR tree walk: the one recursive traversal every training
//! iteration runs once per player. Grounded on `walk_pure_cfr` in the
//! original's `pure_cfr_machine.cpp`.

use rand::Rng;

use crate::error::SolverError;
use crate::hand::Hand;
use crate::store::{entry_index, Store};
use crate::tree::{Node, NodeId, Tree};

/// Purifies a round's positive-regret vector into a single sampled choice.
/// If every choice has zero or negative regret, falls back to a uniform
/// draw over all choices (the original's "if pos_sum == 0, treat every
/// choice as weight 1" substitution). Mirrors the dart-throw/cumulative-
/// subtract sampling in `walk_pure_cfr`.
fn sample_choice(values: &[u64], sum: u64, rng: &mut impl Rng) -> usize {
    if sum == 0 {
        return rng.random_range(0..values.len());
    }
    let mut dart = rng.random_range(0..sum);
    for (choice, &value) in values.iter().enumerate() {
        if dart < value {
            return choice;
        }
        dart -= value;
    }
    unreachable!("dart must land within the cumulative positive-regret mass")
}

/// Walks the tree once from `node`, sampling every other player's action
/// purely from current regret but exploring every one of `position`'s own
/// actions, updating `position`'s regrets (and, if `track_average` is set,
/// every visited player's average-strategy counters) along the way.
/// Returns `position`'s payoff for this sampled line. Mirrors
/// `walk_pure_cfr` in the original exactly, including its terminal-cut
/// check (`get_child() == NULL || did_player_fold(position)`).
pub fn walk(
    tree: &Tree,
    node: NodeId,
    hand: &Hand,
    position: usize,
    store: &Store,
    rng: &mut impl Rng,
    track_average: bool,
) -> anyhow::Result<i64> {
    let node_ref = tree.get(node);
    if node_ref.is_terminal() {
        return Ok(node_ref.evaluate(hand, position));
    }
    if let Node::Decision3p { player_folded, .. } = node_ref {
        if player_folded[position] {
            return Ok(node_ref.evaluate(hand, position));
        }
    }

    let (round, player, soln_idx, num_choices, children) = match node_ref {
        Node::Decision { round, player, soln_idx, num_choices, children } => {
            (*round, *player, *soln_idx, *num_choices, children)
        }
        Node::Decision3p { round, player, soln_idx, num_choices, children, .. } => {
            (*round, *player, *soln_idx, *num_choices, children)
        }
        _ => unreachable!("terminal nodes are handled above"),
    };

    let bucket = hand.buckets[player][round];
    let round_store = &store.rounds[round];
    let base = entry_index(bucket, soln_idx, round_store.num_entries_per_bucket);
    let (values, sum) = round_store.regret.positive_values(base, num_choices);

    let choice = sample_choice(&values, sum, rng);

    if player != position {
        let value = walk(tree, children[choice], hand, position, store, rng, track_average)?;
        if track_average {
            if round_store.avg_strategy.increment(base + choice).is_err() {
                return Err(SolverError::AverageStrategyOverflow { round, bucket, soln_idx }.into());
            }
        }
        Ok(value)
    } else {
        let mut outcomes = Vec::with_capacity(num_choices);
        for &child in children {
            outcomes.push(walk(tree, child, hand, position, store, rng, track_average)?);
        }
        let retval = outcomes[choice];
        round_store.regret.update_regret(base, &outcomes, retval);
        Ok(retval)
    }
}
