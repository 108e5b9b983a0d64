use crate::error::SolverError;
use crate::game::{Action, BettingKind, GameDef, State};

/// Hard ceiling on the number of actions any abstraction may offer at a
/// single decision node, matching the original's `MAX_ABSTRACT_ACTIONS`.
pub const A_MAX: usize = 4;

/// Enumerates the legal abstract actions at `state`, in a fixed order that
/// doubles as both the betting tree's child/sibling order and the
/// purification sampler's tie-break order. Implementations must never
/// return more than [`A_MAX`] actions; callers check this and refuse to
/// build a tree that would violate it.
pub trait ActionAbstraction {
    fn actions(&self, game: &GameDef, state: &State) -> Vec<Action>;
}

fn is_call_legal(_state: &State) -> bool {
    true
}

fn is_fold_legal(state: &State) -> bool {
    state.amount_to_call() > 0
}

/// Offers every legal action: fold (if there's something to call), call,
/// and every raise-to size between the round's minimum and maximum raise,
/// one abstract action per distinct size. Grounded on
/// `NullActionAbstraction::get_actions` in the original's
/// `action_abstraction.cpp`; errors out rather than silently truncating if
/// the enumerated size range would exceed [`A_MAX`].
pub struct NullActionAbstraction;

impl ActionAbstraction for NullActionAbstraction {
    fn actions(&self, game: &GameDef, state: &State) -> Vec<Action> {
        let mut actions = Vec::with_capacity(A_MAX);
        if is_fold_legal(state) {
            actions.push(Action::Fold);
        }
        if is_call_legal(state) {
            actions.push(Action::Call);
        }
        if state.raises_this_round() < game.max_raises_per_round {
            let lo = state.min_raise_to(game);
            let hi = state.max_raise_to(game);
            if lo <= hi {
                match game.betting {
                    BettingKind::Limit => actions.push(Action::Raise(lo)),
                    BettingKind::NoLimit => {
                        let mut to = lo;
                        while to <= hi {
                            actions.push(Action::Raise(to));
                            to += game.min_raise[state.round].max(1);
                        }
                    }
                }
            }
        }
        actions
    }
}

/// Fold/Call/Pot-raise/All-in: the compact four-action abstraction used for
/// no-limit training runs. Grounded on `FcpaActionAbstraction::get_actions`
/// in the original's `action_abstraction.cpp`, including that function's
/// pot-sized-raise formula verbatim — the apparent double-counting of
/// `amount_to_call` is preserved rather than "fixed", since it changes the
/// resulting abstraction's action sizes and any trained strategy is only
/// meaningful relative to the abstraction it was trained against.
pub struct FcpaActionAbstraction;

impl ActionAbstraction for FcpaActionAbstraction {
    fn actions(&self, game: &GameDef, state: &State) -> Vec<Action> {
        let mut actions = Vec::with_capacity(A_MAX);
        if is_fold_legal(state) {
            actions.push(Action::Fold);
        }
        if is_call_legal(state) {
            actions.push(Action::Call);
        }
        if state.raises_this_round() < game.max_raises_per_round {
            let amount_to_call = state.amount_to_call();
            let spent = state.spent[state.acting];
            let mut pot: u32 = state.spent.iter().sum();
            pot += amount_to_call;
            let pot_raise_size = pot + (spent + amount_to_call);
            let max_raise_to = state.max_raise_to(game);
            if pot_raise_size < max_raise_to {
                actions.push(Action::Raise(pot_raise_size));
            }
            actions.push(Action::Raise(max_raise_to));
        }
        actions
    }
}

pub fn check_action_count(round: usize, actions: &[Action]) -> anyhow::Result<()> {
    if actions.len() > A_MAX {
        return Err(SolverError::TooManyActions { round, found: actions.len(), max: A_MAX }.into());
    }
    Ok(())
}

/// Picks `Null` vs `Fcpa` at runtime from the `--action-abs=` CLI flag or
/// config keyword, matching the original's `action_abs_type_t`.
pub enum ActionAbstractionKind {
    Null,
    Fcpa,
}

impl ActionAbstractionKind {
    pub fn parse(s: &str) -> anyhow::Result<ActionAbstractionKind> {
        match s {
            "NULL" => Ok(ActionAbstractionKind::Null),
            "FCPA" => Ok(ActionAbstractionKind::Fcpa),
            other => Err(anyhow::anyhow!("unknown action abstraction type {other}")),
        }
    }

    pub fn actions(&self, game: &GameDef, state: &State) -> Vec<Action> {
        match self {
            ActionAbstractionKind::Null => NullActionAbstraction.actions(game, state),
            ActionAbstractionKind::Fcpa => FcpaActionAbstraction.actions(game, state),
        }
    }
}
