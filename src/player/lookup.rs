use std::path::Path;

use rand::Rng;

use crate::abstraction::{ActionAbstractionKind, CardAbstractionKind};
use crate::config::Parameters;
use crate::game::{Action, Card, GameDef, State};
use crate::store::{entry_index, BorrowedStore};
use crate::tree::{Node, Tree};

use super::translate::translate_raise;

/// A rebuilt betting tree plus a memory-mapped, read-only view of one
/// dump file, used to answer "what should I do here" queries without
/// holding the training-time mutable entry store. Grounded on
/// `PlayerModule` in the original's `player_module.cpp`/`.hpp`.
pub struct PlayerLookup {
    game: GameDef,
    tree: Tree,
    action_abs: ActionAbstractionKind,
    card_abs: CardAbstractionKind,
    entries: BorrowedStore,
    verbose: bool,
    rng_seeds: [u32; 4],
}

impl PlayerLookup {
    /// The real game this strategy was trained for, exposed so a dealer
    /// client can replay real match-state actions through the same rules
    /// this lookup abstracts over (see `src/bin/player.rs`'s match-state
    /// parser).
    pub fn game(&self) -> &GameDef {
        &self.game
    }

    /// The `.player` file's `RNG_SEEDS` words, for a caller that wants to
    /// seed its own action/translation RNG deterministically from the
    /// trained strategy's file rather than from the OS.
    pub fn rng_seeds(&self) -> [u32; 4] {
        self.rng_seeds
    }

    /// Rebuilds the game/tree/abstractions from a `.player` file's header
    /// and opens its binary dump borrow-only, mirroring `PlayerModule`'s
    /// constructor.
    pub fn load(player_file: &str) -> anyhow::Result<PlayerLookup> {
        let file = std::fs::File::open(player_file)?;
        let (params, binary_prefix) = Parameters::read(&mut std::io::BufReader::new(file))?;
        let binary_prefix =
            binary_prefix.ok_or_else(|| anyhow::anyhow!("{player_file} has no BINARY_FILENAME_PREFIX"))?;

        let game_text = std::fs::read_to_string(&params.game_file)?;
        let game = GameDef::parse(&game_text)?;
        let card_abs = params.card_abstraction()?;
        let action_abs = params.action_abstraction()?;
        let tree = Tree::build(&game, &action_abs)?;

        let mut totals = [0u64; crate::game::R_MAX];
        for r in 0..game.num_rounds {
            totals[r] = tree.num_entries_per_bucket[r] * card_abs.num_buckets(&game, r);
        }

        let suffix = if params.do_average { "avg-strategy" } else { "regrets" };
        let entries = BorrowedStore::open(Path::new(&format!("{binary_prefix}.{suffix}")), &totals, game.num_rounds)?;

        Ok(PlayerLookup {
            game,
            tree,
            action_abs,
            card_abs,
            entries,
            verbose: params.verbose,
            rng_seeds: params.rng_seeds,
        })
    }

    /// Re-derives the abstract action distribution for the current
    /// decision point by replaying `history` (every real action taken so
    /// far this hand) through the rebuilt tree, translating no-limit
    /// raises with [`translate_raise`]. Falls back to the default
    /// distribution (entirely on the first `Call`, else the first action)
    /// if a real action can't be translated at all. Mirrors
    /// `get_action_probs` in the original.
    pub fn action_probs(&self, hole: &[Card], board: &[Card], history: &[Action], rng: &mut impl Rng) -> Vec<f64> {
        let mut state = State::new(&self.game);
        let mut node = self.tree.root;

        for &real_action in history {
            let abstract_actions = self.action_abs.actions(&self.game, &state);
            let choice = match real_action {
                Action::Raise(to) => match translate_raise(&abstract_actions, to, rng) {
                    Some(i) => i,
                    None => return self.default_action_probs(&abstract_actions),
                },
                non_raise => match abstract_actions.iter().position(|a| {
                    std::mem::discriminant(a) == std::mem::discriminant(&non_raise)
                }) {
                    Some(i) => i,
                    None => return self.default_action_probs(&abstract_actions),
                },
            };

            let children = match self.tree.get(node) {
                Node::Decision { children, .. } | Node::Decision3p { children, .. } => children,
                _ => return self.default_action_probs(&abstract_actions),
            };
            let Some(&next) = children.get(choice) else {
                return self.default_action_probs(&abstract_actions);
            };
            node = next;
            state.apply(&self.game, abstract_actions[choice]);
        }

        let (round, soln_idx, num_choices) = match self.tree.get(node) {
            Node::Decision { round, soln_idx, num_choices, .. }
            | Node::Decision3p { round, soln_idx, num_choices, .. } => (*round, *soln_idx, *num_choices),
            _ => return Vec::new(),
        };

        let bucket = self.card_abs.bucket(&self.game, round, &hole[..], &board[..self.game.board_cards_through(round)]);
        let base = entry_index(bucket, soln_idx, self.tree.num_entries_per_bucket[round]);
        let (values, sum) = self.entries.positive_values(round, base, num_choices);

        if sum == 0 {
            let abstract_actions = self.action_abs.actions(&self.game, &state);
            return self.default_action_probs(&abstract_actions);
        }
        values.into_iter().map(|v| v as f64 / sum as f64).collect()
    }

    fn default_action_probs(&self, actions: &[Action]) -> Vec<f64> {
        if self.verbose {
            log::debug!("falling back to the default action distribution");
        }
        let mut probs = vec![0.0; actions.len()];
        match actions.iter().position(|a| matches!(a, Action::Call)) {
            Some(i) => probs[i] = 1.0,
            None if !probs.is_empty() => probs[0] = 1.0,
            None => {}
        }
        probs
    }

    /// Samples one action from [`PlayerLookup::action_probs`]. Mirrors
    /// `get_action` in the original.
    pub fn act(&self, hole: &[Card], board: &[Card], history: &[Action], rng: &mut impl Rng) -> Action {
        let mut state = State::new(&self.game);
        for &a in history {
            state.apply(&self.game, a);
        }
        let actions = self.action_abs.actions(&self.game, &state);
        let probs = self.action_probs(hole, board, history, rng);
        if probs.is_empty() || actions.is_empty() {
            return Action::Call;
        }
        let dart: f64 = rng.random_range(0.0..1.0);
        let mut cumulative = 0.0;
        for (i, p) in probs.iter().enumerate() {
            cumulative += p;
            if dart < cumulative {
                return actions[i];
            }
        }
        actions[actions.len() - 1]
    }
}
