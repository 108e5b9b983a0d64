/// A single card, encoded as `rank * num_suits + suit` the way
/// `krukah-robopoker`'s `Card::to_int` and the original's card abstraction
/// both encode cards, except the rank/suit counts are runtime parameters of
/// the owning `GameDef` rather than a fixed 52-card deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(pub u8);

impl Card {
    pub fn from_index(index: u8) -> Self {
        Card(index)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self, num_suits: u8) -> u8 {
        self.0 / num_suits
    }

    pub fn suit(self, num_suits: u8) -> u8 {
        self.0 % num_suits
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}
