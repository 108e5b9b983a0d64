//! A minimal parser for the dealer's `MATCHSTATE:<position>:<hand>:
//! <betting>:<cards>` line format. Deliberately thin: the full
//! dealer-network protocol is an external collaborator, so this only
//! extracts what [`PlayerLookup::act`](pure_cfr_solver::player::PlayerLookup::act)
//! needs — this seat's position, the dealt cards, and the ordered real
//! actions taken so far — rather than every field of the real protocol
//! (hand numbers, per-seat results, etc).

use pure_cfr_solver::game::{Action, Card};

pub struct MatchState {
    position: usize,
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
    pub history: Vec<Action>,
}

impl MatchState {
    pub fn viewing_player(&self) -> usize {
        self.position
    }

    pub fn parse(line: &str) -> Option<MatchState> {
        let rest = line.strip_prefix("MATCHSTATE:")?;
        let mut fields = rest.splitn(4, ':');
        let position: usize = fields.next()?.parse().ok()?;
        let _hand_number = fields.next()?;
        let betting = fields.next()?;
        let cards = fields.next()?;

        let history = parse_betting(betting);
        let (hole_all, board) = parse_cards(cards)?;
        let hole = hole_all.get(position)?.clone();

        Some(MatchState { position, hole, board, history })
    }
}

/// `"cr20c/cc"` -> one `Action` per token, round slashes dropped (the raise
/// amount is already the ACPC wire format's total-after-raise convention,
/// matching [`Action::Raise`]'s own).
fn parse_betting(betting: &str) -> Vec<Action> {
    let mut actions = Vec::new();
    for round in betting.split('/') {
        let bytes = round.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'f' => {
                    actions.push(Action::Fold);
                    i += 1;
                }
                b'c' => {
                    actions.push(Action::Call);
                    i += 1;
                }
                b'r' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < bytes.len() && bytes[end].is_ascii_digit() {
                        end += 1;
                    }
                    if let Ok(size) = round[start..end].parse::<u32>() {
                        actions.push(Action::Raise(size));
                    }
                    i = end;
                }
                _ => i += 1,
            }
        }
    }
    actions
}

const RANKS: &str = "23456789TJQKA";
const SUITS: &str = "cdhs";

fn parse_card(token: &str) -> Option<Card> {
    let mut chars = token.chars();
    let rank = chars.next()?;
    let suit = chars.next()?;
    let rank_idx = RANKS.find(rank)? as u8;
    let suit_idx = SUITS.find(suit)? as u8;
    Some(Card::from_index(rank_idx * SUITS.len() as u8 + suit_idx))
}

fn parse_card_run(run: &str) -> Vec<Card> {
    run.as_bytes()
        .chunks(2)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok().and_then(parse_card))
        .collect()
}

/// `"2h2s|9d9c/Ks9h2h"` -> (`[[2h,2s],[9d,9c]]`, `[Ks,9h,2h]`), board cards
/// accumulated across every round segment after the hole-card segment.
fn parse_cards(cards: &str) -> Option<(Vec<Vec<Card>>, Vec<Card>)> {
    let mut segments = cards.split('/');
    let hole_segment = segments.next()?;
    let hole: Vec<Vec<Card>> = hole_segment.split('|').map(parse_card_run).collect();
    let mut board = Vec::new();
    for segment in segments {
        board.extend(parse_card_run(segment));
    }
    Some((hole, board))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_preflop_heads_up_line() {
        let state = MatchState::parse("MATCHSTATE:0:1::2h2s|9d9c").unwrap();
        assert_eq!(state.viewing_player(), 0);
        assert_eq!(state.hole, vec![parse_card("2h").unwrap(), parse_card("2s").unwrap()]);
        assert!(state.history.is_empty());
        assert!(state.board.is_empty());
    }

    #[test]
    fn parses_betting_and_board() {
        let state = MatchState::parse("MATCHSTATE:1:1:cr20c/cc:2h2s|9d9c/Ks9h2h").unwrap();
        assert_eq!(state.history, vec![Action::Call, Action::Raise(20), Action::Call, Action::Call, Action::Call]);
        assert_eq!(state.board.len(), 3);
    }
}
