//! Game definition, betting state, and the thin card/hand-ranking interface
//! the rest of the solver is built over. This is intentionally the smallest
//! layer that makes the abstraction/tree/engine modules exercisable; a real
//! ACPC `.game` grammar and a full multi-street hand evaluator are not goals
//! of this crate.

mod action;
mod card;
mod def;
mod rank;
mod state;

pub use action::Action;
pub use card::Card;
pub use def::{BettingKind, GameDef};
pub use rank::{HighCardRanker, Ranker};
pub use state::State;

/// Hard ceiling on betting rounds any game definition may use.
pub const R_MAX: usize = 4;

/// Hard ceiling on players any game definition may use.
pub const N_MAX: usize = 3;

/// Deals fresh hole and board cards for one hand from a shuffled deck,
/// mirroring `dealCards()` in the original's `pure_cfr_machine.cpp`.
pub fn deal_cards(game: &GameDef, rng: &mut impl rand::Rng) -> (Vec<Vec<Card>>, Vec<Card>) {
    let mut deck: Vec<Card> = (0..game.deck_size()).map(Card::from_index).collect();
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
    let mut drawn = deck.into_iter();
    let hole: Vec<Vec<Card>> = (0..game.num_players)
        .map(|_| (0..game.num_hole_cards).map(|_| drawn.next().unwrap()).collect())
        .collect();
    let total_board: usize = game.board_cards_through(game.num_rounds - 1);
    let board: Vec<Card> = (0..total_board).map(|_| drawn.next().unwrap()).collect();
    (hole, board)
}
