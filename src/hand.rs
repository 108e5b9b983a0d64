//! One dealt hand: the concrete cards every player and the board hold for
//! an iteration, the card-abstraction buckets derived from them, and the
//! baked showdown evaluation the betting tree's terminal nodes read from.
//! Grounded on `hand_t` in the original's `hand.hpp` and the evaluation
//! baking in `PureCfrMachine::generate_hand` (`pure_cfr_machine.cpp`).

use crate::abstraction::CardAbstractionKind;
use crate::game::{Card, GameDef, Ranker, R_MAX};
use crate::tree::LeafType;

/// Sentinel meaning "this player gets no share of the pot at this leaf",
/// matching the original's use of `INT_MAX` in `pot_frac_recip`.
pub const NO_SHARE: u32 = u32::MAX;

#[derive(Debug, Clone)]
pub enum Eval {
    /// Two-player showdown value per player: +1 win, -1 loss, 0 tie.
    TwoPlayer { showdown_value: [i8; 2] },
    /// Three-player pot-fraction reciprocal per player per leaf type: the
    /// player's money-line share of the pot at that leaf is
    /// `pot_size / pot_frac_recip[player][leaf]`, or zero if `NO_SHARE`.
    ThreePlayer { pot_frac_recip: [[u32; 7]; 3] },
}

#[derive(Debug, Clone)]
pub struct Hand {
    pub hole: Vec<Vec<Card>>,
    pub board: Vec<Card>,
    /// `buckets[player][round]`, precomputed up front when the card
    /// abstraction allows it.
    pub buckets: Vec<[u64; R_MAX]>,
    pub eval: Eval,
}

impl Hand {
    pub fn deal(
        game: &GameDef,
        ranker: &dyn Ranker,
        card_abs: &CardAbstractionKind,
        rng: &mut impl rand::Rng,
    ) -> Hand {
        let (hole, board) = crate::game::deal_cards(game, rng);

        let mut buckets = vec![[0u64; R_MAX]; game.num_players];
        for p in 0..game.num_players {
            for r in 0..game.num_rounds {
                buckets[p][r] = card_abs.bucket(game, r, &hole[p], &board[..game.board_cards_through(r)]);
            }
        }

        let ranks: Vec<u32> = (0..game.num_players)
            .map(|p| ranker.rank(game, &hole[p], &board))
            .collect();

        let eval = if game.num_players == 2 {
            let mut showdown_value = [0i8; 2];
            if ranks[0] > ranks[1] {
                showdown_value = [1, -1];
            } else if ranks[1] > ranks[0] {
                showdown_value = [-1, 1];
            }
            Eval::TwoPlayer { showdown_value }
        } else {
            let mut pot_frac_recip = [[NO_SHARE; 7]; 3];
            for leaf in LeafType::ALL {
                let survivors = leaf.survivors();
                if survivors.len() == 1 {
                    pot_frac_recip[survivors[0]][leaf as usize] = 1;
                } else {
                    let local_top = survivors.iter().copied().map(|p| ranks[p]).max().unwrap();
                    let local_winners: Vec<usize> =
                        survivors.iter().copied().filter(|&p| ranks[p] == local_top).collect();
                    for &p in &survivors {
                        pot_frac_recip[p][leaf as usize] = if ranks[p] == local_top {
                            local_winners.len() as u32
                        } else {
                            NO_SHARE
                        };
                    }
                }
            }
            Eval::ThreePlayer { pot_frac_recip }
        };

        Hand { hole, board, buckets, eval }
    }
}
