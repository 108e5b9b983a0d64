use super::{Card, GameDef};

/// Showdown hand ranking. A real multi-street evaluator lives outside this
/// crate; implementors of richer games should supply their own `Ranker`,
/// the same way this interface is an external collaborator to the solver
/// core.
pub trait Ranker {
    /// Higher is better. Ties are equal ranks.
    fn rank(&self, game: &GameDef, hole: &[Card], board: &[Card]) -> u32;
}

/// Ranks a hand by its single highest card, ignoring suit. Sufficient for
/// the toy one-card and Kuhn-style games this crate tests against.
pub struct HighCardRanker;

impl Ranker for HighCardRanker {
    fn rank(&self, game: &GameDef, hole: &[Card], board: &[Card]) -> u32 {
        hole.iter()
            .chain(board.iter())
            .map(|c| c.rank(game.num_suits) as u32)
            .max()
            .unwrap_or(0)
    }
}
