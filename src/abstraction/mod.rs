//! Action and card abstractions: the two ways the solver coarsens a game's
//! true state space down to something the entry store can afford to track.

mod action_abstraction;
mod card_abstraction;

pub use action_abstraction::{
    check_action_count, ActionAbstraction, ActionAbstractionKind, FcpaActionAbstraction, NullActionAbstraction, A_MAX,
};
pub use card_abstraction::{BlindCardAbstraction, CardAbstraction, CardAbstractionKind, NullCardAbstraction};
