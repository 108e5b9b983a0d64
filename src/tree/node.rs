use super::LeafType;

/// Index into a [`Tree`](super::Tree)'s node arena. Replaces the original's
/// raw `BettingNode*` pointers with an arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// One node of the betting tree. Decision nodes carry the index into the
/// entry store (`soln_idx`) assigned during the depth-first build; terminal
/// nodes carry their showdown/fold payoff baked in at build time.
///
/// Child order is action-enumeration order: the `i`-th entry of `children`
/// is the subtree reached by playing the abstraction's `i`-th legal action.
/// This replaces the original's intrusive sibling linked list — the same
/// order is preserved, just as a `Vec` index instead of a pointer chain.
#[derive(Debug, Clone)]
pub enum Node {
    Decision { round: usize, player: usize, soln_idx: u64, num_choices: usize, children: Vec<NodeId> },
    Terminal2p { showdown: bool, fold_value: [i8; 2], money: u32 },
    /// Inlines the same terminal payoff an `InfoSetNode3p` embeds in the
    /// original so a folded player's cut can be read directly without a
    /// separate terminal node: `terminal` holds the leaf's money-line
    /// payoff, `decision` (when present) is the chance for the players
    /// still live to act further, reached only when the acting player in
    /// question has not folded.
    Decision3p {
        round: usize,
        player: usize,
        soln_idx: u64,
        num_choices: usize,
        children: Vec<NodeId>,
        player_folded: [bool; 3],
        pot_size: u32,
        money_spent: [u32; 3],
        leaf_type: LeafType,
    },
    Terminal3p { pot_size: u32, money_spent: [u32; 3], leaf_type: LeafType },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal2p { .. } | Node::Terminal3p { .. })
    }
}
