/// The seven non-empty subsets of survivors a three-player hand can reach,
/// matching the original's `leaf_type_t`. Variant order is the tag order
/// used on disk and in `pot_frac_recip`, so it must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum LeafType {
    P0 = 0,
    P1 = 1,
    P0P1 = 2,
    P2 = 3,
    P0P2 = 4,
    P1P2 = 5,
    P0P1P2 = 6,
}

impl LeafType {
    pub const ALL: [LeafType; 7] =
        [LeafType::P0, LeafType::P1, LeafType::P0P1, LeafType::P2, LeafType::P0P2, LeafType::P1P2, LeafType::P0P1P2];

    /// Players still in the hand at this leaf, ascending order.
    pub fn survivors(self) -> Vec<usize> {
        match self {
            LeafType::P0 => vec![0],
            LeafType::P1 => vec![1],
            LeafType::P0P1 => vec![0, 1],
            LeafType::P2 => vec![2],
            LeafType::P0P2 => vec![0, 2],
            LeafType::P1P2 => vec![1, 2],
            LeafType::P0P1P2 => vec![0, 1, 2],
        }
    }

    /// Classifies which of the seven leaf types a finished three-player
    /// state has reached, mirroring `get_term_values_3p` in the original's
    /// `betting_node.cpp`.
    pub fn from_folded(folded: &[bool]) -> LeafType {
        match (folded[0], folded[1], folded[2]) {
            (false, true, true) => LeafType::P0,
            (true, false, true) => LeafType::P1,
            (true, true, false) => LeafType::P2,
            (false, false, true) => LeafType::P0P1,
            (false, true, false) => LeafType::P0P2,
            (true, false, false) => LeafType::P1P2,
            (false, false, false) => LeafType::P0P1P2,
            (true, true, true) => unreachable!("a hand cannot finish with every player folded"),
        }
    }
}
