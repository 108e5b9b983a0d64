use crate::game::{Card, GameDef};

/// Maps a player's private cards plus the board dealt so far to a bucket
/// index, for one round. `num_buckets(round)` gives that round's bucket
/// count `B_r`. Grounded on `CardAbstraction` in the original's
/// `card_abstraction.cpp`/`.hpp`.
pub trait CardAbstraction {
    fn num_buckets(&self, game: &GameDef, round: usize) -> u64;
    fn bucket(&self, game: &GameDef, round: usize, hole: &[Card], board: &[Card]) -> u64;
    /// Whether buckets for every round can be computed up front from just
    /// the dealt cards (true for both abstractions here, since neither
    /// depends on opponents' actions).
    fn can_precompute(&self) -> bool {
        true
    }
}

/// One bucket, for every round: players are indistinguishable by cards.
/// Grounded on `BlindCardAbstraction` in the original.
pub struct BlindCardAbstraction;

impl CardAbstraction for BlindCardAbstraction {
    fn num_buckets(&self, _game: &GameDef, _round: usize) -> u64 {
        1
    }

    fn bucket(&self, _game: &GameDef, _round: usize, _hole: &[Card], _board: &[Card]) -> u64 {
        0
    }
}

/// No abstraction at all: every distinct combination of hole cards and
/// board-through-round cards is its own bucket, base-`deck_size` encoded
/// with hole cards first, then board cards in dealt order. Grounded on
/// `NullCardAbstraction` in the original's `card_abstraction.cpp`.
pub struct NullCardAbstraction;

impl CardAbstraction for NullCardAbstraction {
    fn num_buckets(&self, game: &GameDef, round: usize) -> u64 {
        let deck_size = game.deck_size() as u64;
        let mut buckets = deck_size.pow(game.num_hole_cards as u32);
        buckets *= deck_size.pow(game.board_cards_through(round) as u32);
        buckets
    }

    fn bucket(&self, game: &GameDef, round: usize, hole: &[Card], board: &[Card]) -> u64 {
        let deck_size = game.deck_size() as u64;
        let mut bucket: u64 = 0;
        for card in hole {
            bucket = bucket * deck_size + card.index() as u64;
        }
        let through = game.board_cards_through(round);
        for card in board.iter().take(through) {
            bucket = bucket * deck_size + card.index() as u64;
        }
        bucket
    }
}

/// Picks `Null` vs `Blind` at runtime from the `--card-abs=` CLI flag or
/// config keyword, matching the original's `card_abs_type_t`.
pub enum CardAbstractionKind {
    Null,
    Blind,
}

impl CardAbstractionKind {
    pub fn parse(s: &str) -> anyhow::Result<CardAbstractionKind> {
        match s {
            "NULL" => Ok(CardAbstractionKind::Null),
            "BLIND" => Ok(CardAbstractionKind::Blind),
            other => Err(anyhow::anyhow!("unknown card abstraction type {other}")),
        }
    }

    pub fn num_buckets(&self, game: &GameDef, round: usize) -> u64 {
        match self {
            CardAbstractionKind::Null => NullCardAbstraction.num_buckets(game, round),
            CardAbstractionKind::Blind => BlindCardAbstraction.num_buckets(game, round),
        }
    }

    pub fn bucket(&self, game: &GameDef, round: usize, hole: &[Card], board: &[Card]) -> u64 {
        match self {
            CardAbstractionKind::Null => NullCardAbstraction.bucket(game, round, hole, board),
            CardAbstractionKind::Blind => BlindCardAbstraction.bucket(game, round, hole, board),
        }
    }
}
