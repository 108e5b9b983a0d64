use super::{LeafType, Node, NodeId};
use crate::abstraction::{check_action_count, ActionAbstractionKind};
use crate::game::{Action, GameDef, State, R_MAX};

/// The fully built betting tree: a flat node arena plus the root and the
/// per-round entry counts (`N_r`) the depth-first build accumulated while
/// assigning `soln_idx`. Grounded on `init_betting_tree_r` in the
/// original's `betting_node.cpp`.
pub struct Tree {
    pub nodes: Vec<Node>,
    pub root: NodeId,
    pub num_entries_per_bucket: [u64; R_MAX],
}

impl Tree {
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn build(game: &GameDef, action_abs: &ActionAbstractionKind) -> anyhow::Result<Tree> {
        let mut nodes = Vec::new();
        let mut num_entries_per_bucket = [0u64; R_MAX];
        let state = State::new(game);
        let root = build_r(game, action_abs, state, &mut nodes, &mut num_entries_per_bucket)?;
        Ok(Tree { nodes, root, num_entries_per_bucket })
    }
}

fn money_line_3p(state: &State) -> (u32, [u32; 3], LeafType) {
    let mut money_spent = [0u32; 3];
    let mut pot_size = 0u32;
    for p in 0..3 {
        money_spent[p] = state.spent[p];
        pot_size += money_spent[p];
    }
    let leaf_type = LeafType::from_folded(&state.folded);
    (pot_size, money_spent, leaf_type)
}

fn build_r(
    game: &GameDef,
    action_abs: &ActionAbstractionKind,
    state: State,
    nodes: &mut Vec<Node>,
    num_entries_per_bucket: &mut [u64; R_MAX],
) -> anyhow::Result<NodeId> {
    if state.finished {
        let node = match game.num_players {
            2 => {
                let showdown = !(state.folded[0] || state.folded[1]);
                let mut fold_value = [0i8; 2];
                let mut money = 0u32;
                for p in 0..2 {
                    if state.folded[p] {
                        fold_value[p] = -1;
                        money = state.spent[p];
                    } else if state.folded[1 - p] {
                        fold_value[p] = 1;
                        money = state.spent[1 - p];
                    } else {
                        fold_value[p] = 0;
                        money = state.spent[p];
                    }
                }
                Node::Terminal2p { showdown, fold_value, money }
            }
            3 => {
                let (pot_size, money_spent, leaf_type) = money_line_3p(&state);
                Node::Terminal3p { pot_size, money_spent, leaf_type }
            }
            n => anyhow::bail!("cannot build a betting tree for {n}-player games"),
        };
        let id = NodeId(nodes.len() as u32);
        nodes.push(node);
        return Ok(id);
    }

    let actions: Vec<Action> = action_abs.actions(game, &state);
    check_action_count(state.round, &actions)?;
    let num_choices = actions.len();
    let soln_idx = num_entries_per_bucket[state.round];
    num_entries_per_bucket[state.round] += num_choices as u64;

    let mut children = Vec::with_capacity(num_choices);
    for action in &actions {
        let mut next = state.clone();
        next.apply(game, *action);
        children.push(build_r(game, action_abs, next, nodes, num_entries_per_bucket)?);
    }

    let round = state.round;
    let player = state.acting;
    let node = match game.num_players {
        2 => Node::Decision { round, player, soln_idx, num_choices, children },
        3 => {
            let mut player_folded = [false; 3];
            player_folded.copy_from_slice(&state.folded[..3]);
            let (pot_size, money_spent, leaf_type) = money_line_3p(&state);
            Node::Decision3p {
                round,
                player,
                soln_idx,
                num_choices,
                children,
                player_folded,
                pot_size,
                money_spent,
                leaf_type,
            }
        }
        n => anyhow::bail!("cannot build a betting tree for {n}-player games"),
    };
    let id = NodeId(nodes.len() as u32);
    nodes.push(node);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::ActionAbstractionKind;

    /// Every decision node's `soln_idx` range `[soln_idx, soln_idx +
    /// num_choices)` is disjoint from every other node's in the same
    /// round, and the round's final `num_entries_per_bucket` is the
    /// smallest bound covering all of them.
    fn assert_soln_idx_disjoint(tree: &Tree) {
        let mut ranges_per_round: Vec<Vec<(u64, u64)>> = vec![Vec::new(); R_MAX];
        for node in &tree.nodes {
            let (round, soln_idx, num_choices) = match node {
                Node::Decision { round, soln_idx, num_choices, .. } => (*round, *soln_idx, *num_choices),
                Node::Decision3p { round, soln_idx, num_choices, .. } => (*round, *soln_idx, *num_choices),
                _ => continue,
            };
            ranges_per_round[round].push((soln_idx, soln_idx + num_choices as u64));
        }
        for (round, ranges) in ranges_per_round.iter().enumerate() {
            for (i, &(a_start, a_end)) in ranges.iter().enumerate() {
                assert!(a_end <= tree.num_entries_per_bucket[round], "round {round} range {a_start}..{a_end} exceeds N_r");
                for &(b_start, b_end) in &ranges[i + 1..] {
                    assert!(a_end <= b_start || b_end <= a_start, "overlapping soln_idx ranges in round {round}: {a_start}..{a_end} vs {b_start}..{b_end}");
                }
            }
        }
    }

    #[test]
    fn toy_one_card_tree_has_disjoint_soln_idx_ranges() {
        let game = GameDef::toy_one_card();
        let tree = Tree::build(&game, &ActionAbstractionKind::Null).unwrap();
        assert!(tree.num_entries_per_bucket[0] > 0);
        assert_soln_idx_disjoint(&tree);
    }

    #[test]
    fn toy_kuhn3_tree_has_disjoint_soln_idx_ranges() {
        let game = GameDef::toy_kuhn3();
        let tree = Tree::build(&game, &ActionAbstractionKind::Null).unwrap();
        assert!(tree.num_entries_per_bucket[0] > 0);
        assert_soln_idx_disjoint(&tree);
    }

    #[test]
    fn root_of_toy_one_card_tree_is_a_decision_node() {
        let game = GameDef::toy_one_card();
        let tree = Tree::build(&game, &ActionAbstractionKind::Null).unwrap();
        assert!(matches!(tree.get(tree.root), Node::Decision { .. }));
    }

    #[test]
    fn three_player_tree_rejects_four_player_game() {
        let mut game = GameDef::toy_kuhn3();
        game.num_players = 4;
        let err = Tree::build(&game, &ActionAbstractionKind::Null).unwrap_err();
        assert!(err.to_string().contains("4-player"));
    }
}
