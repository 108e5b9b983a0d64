//! The betting tree: a flat arena of decision and terminal nodes built once
//! per `(GameDef, ActionAbstraction)` pair and then walked for every
//! iteration of self-play. Grounded on `betting_node.hpp`/`.cpp` in the
//! original; the arena/enum redesign is described on [`Node`].

mod build;
mod leaf;
mod node;

pub use build::Tree;
pub use leaf::LeafType;
pub use node::{Node, NodeId};

use crate::hand::{Eval, Hand, NO_SHARE};

impl Node {
    /// Evaluates this node's payoff for `position`, using `hand`'s baked
    /// showdown result, as whole chips (the entry store's regrets are
    /// integer-valued, so the payoff arithmetic stays integer throughout).
    /// Only valid for terminal nodes, or for a `Decision3p` node where
    /// `position` has already folded (the embedded-payoff "terminal cut"
    /// described on [`Node::Decision3p`]).
    pub fn evaluate(&self, hand: &Hand, position: usize) -> i64 {
        match self {
            Node::Terminal2p { showdown, fold_value, money } => {
                let Eval::TwoPlayer { showdown_value } = &hand.eval else {
                    panic!("2-player terminal node evaluated against a non-2-player hand");
                };
                let value = if *showdown { showdown_value[position] } else { fold_value[position] };
                value as i64 * *money as i64
            }
            Node::Terminal3p { pot_size, money_spent, leaf_type } => {
                evaluate_3p(hand, position, *pot_size, money_spent, *leaf_type)
            }
            Node::Decision3p { pot_size, money_spent, leaf_type, .. } => {
                evaluate_3p(hand, position, *pot_size, money_spent, *leaf_type)
            }
            Node::Decision { .. } => panic!("evaluate() called on a non-terminal 2-player decision node"),
        }
    }
}

fn evaluate_3p(hand: &Hand, position: usize, pot_size: u32, money_spent: &[u32; 3], leaf_type: LeafType) -> i64 {
    let Eval::ThreePlayer { pot_frac_recip } = &hand.eval else {
        panic!("3-player terminal payoff evaluated against a non-3-player hand");
    };
    let recip = pot_frac_recip[position][leaf_type as usize];
    let share = if recip == NO_SHARE { 0 } else { pot_size as i64 / recip as i64 };
    share - money_spent[position] as i64
}
