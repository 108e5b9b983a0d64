use super::R_MAX;
use crate::error::SolverError;

/// Limit vs no-limit betting, mirroring the original's `bettingType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingKind {
    Limit,
    NoLimit,
}

/// Description of one game: player count, round structure, deck size, and
/// betting parameters. This is a hand-rolled analogue of the ACPC `.game`
/// format, kept deliberately small — a full grammar for every ACPC rule
/// variant is out of scope for this crate.
#[derive(Debug, Clone)]
pub struct GameDef {
    pub num_players: usize,
    pub num_rounds: usize,
    pub num_ranks: u8,
    pub num_suits: u8,
    pub num_hole_cards: usize,
    pub board_cards_per_round: [usize; R_MAX],
    pub betting: BettingKind,
    pub stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Fixed per-round raise increment, used only in `BettingKind::Limit`.
    pub limit_raise_size: [u32; R_MAX],
    /// Minimum legal raise-to amount per round, used only in `NoLimit`.
    pub min_raise: [u32; R_MAX],
    pub max_raises_per_round: u32,
    pub first_to_act: [usize; R_MAX],
}

impl GameDef {
    pub fn deck_size(&self) -> usize {
        self.num_ranks as usize * self.num_suits as usize
    }

    /// Total board cards dealt by the end of `round`, inclusive.
    pub fn board_cards_through(&self, round: usize) -> usize {
        self.board_cards_per_round[..=round].iter().sum()
    }

    /// Parses the keyword-per-line format used by this crate's toy game
    /// files, modeled on the keyword-per-line convention shared with the
    /// config/player file format rather than the full ACPC `.game` grammar.
    pub fn parse(text: &str) -> anyhow::Result<GameDef> {
        let mut num_players = 2usize;
        let mut num_rounds = 1usize;
        let mut num_ranks = 13u8;
        let mut num_suits = 4u8;
        let mut num_hole_cards = 2usize;
        let mut board_cards_per_round = [0usize; R_MAX];
        let mut betting = BettingKind::Limit;
        let mut stack = 20_000u32;
        let mut small_blind = 1u32;
        let mut big_blind = 2u32;
        let mut limit_raise_size = [2u32; R_MAX];
        let mut min_raise = [2u32; R_MAX];
        let mut max_raises_per_round = 4u32;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let keyword = parts.next().unwrap_or_default();
            let rest: Vec<&str> = parts.collect();
            match keyword {
                "NUM_PLAYERS" => num_players = rest[0].parse()?,
                "NUM_ROUNDS" => num_rounds = rest[0].parse()?,
                "NUM_RANKS" => num_ranks = rest[0].parse()?,
                "NUM_SUITS" => num_suits = rest[0].parse()?,
                "NUM_HOLE_CARDS" => num_hole_cards = rest[0].parse()?,
                "BOARD_CARDS" => {
                    for (i, v) in rest.iter().enumerate().take(R_MAX) {
                        board_cards_per_round[i] = v.parse()?;
                    }
                }
                "BETTING_TYPE" => {
                    betting = match rest[0] {
                        "LIMIT" => BettingKind::Limit,
                        "NOLIMIT" => BettingKind::NoLimit,
                        other => {
                            return Err(SolverError::BadGameDef(format!(
                                "unknown BETTING_TYPE {other}"
                            ))
                            .into());
                        }
                    }
                }
                "STACK" => stack = rest[0].parse()?,
                "SMALL_BLIND" => small_blind = rest[0].parse()?,
                "BIG_BLIND" => big_blind = rest[0].parse()?,
                "LIMIT_RAISE_SIZE" => {
                    for (i, v) in rest.iter().enumerate().take(R_MAX) {
                        limit_raise_size[i] = v.parse()?;
                    }
                }
                "MIN_RAISE" => {
                    for (i, v) in rest.iter().enumerate().take(R_MAX) {
                        min_raise[i] = v.parse()?;
                    }
                }
                "MAX_RAISES_PER_ROUND" => max_raises_per_round = rest[0].parse()?,
                other => {
                    return Err(SolverError::BadGameDef(format!("unknown keyword {other}")).into());
                }
            }
        }
        if num_rounds > R_MAX {
            return Err(SolverError::BadGameDef(format!(
                "NUM_ROUNDS {num_rounds} exceeds compiled-in R_MAX {R_MAX}"
            ))
            .into());
        }
        let first_to_act = [0usize; R_MAX];
        Ok(GameDef {
            num_players,
            num_rounds,
            num_ranks,
            num_suits,
            num_hole_cards,
            board_cards_per_round,
            betting,
            stack,
            small_blind,
            big_blind,
            limit_raise_size,
            min_raise,
            max_raises_per_round,
            first_to_act,
        })
    }

    /// One private card, one showdown round, heads-up, no raising: the
    /// smallest possible exercise of the betting tree and entry store.
    pub fn toy_one_card() -> GameDef {
        GameDef {
            num_players: 2,
            num_rounds: 1,
            num_ranks: 3,
            num_suits: 1,
            num_hole_cards: 1,
            board_cards_per_round: [0, 0, 0, 0],
            betting: BettingKind::Limit,
            stack: 10,
            small_blind: 1,
            big_blind: 2,
            limit_raise_size: [2, 0, 0, 0],
            min_raise: [2, 0, 0, 0],
            max_raises_per_round: 1,
            first_to_act: [0, 0, 0, 0],
        }
    }

    /// Three-player Kuhn poker: one private card each, one betting round,
    /// no board cards, fixed-size limit bets.
    pub fn toy_kuhn3() -> GameDef {
        GameDef {
            num_players: 3,
            num_rounds: 1,
            num_ranks: 4,
            num_suits: 1,
            num_hole_cards: 1,
            board_cards_per_round: [0, 0, 0, 0],
            betting: BettingKind::Limit,
            stack: 5,
            small_blind: 1,
            big_blind: 1,
            limit_raise_size: [1, 0, 0, 0],
            min_raise: [1, 0, 0, 0],
            max_raises_per_round: 1,
            first_to_act: [0, 0, 0, 0],
        }
    }
}
