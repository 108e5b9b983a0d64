/// One betting choice. A no-limit raise carries the total number of chips
/// the acting player will have committed after the raise (not the delta);
/// a limit raise carries no size since it is always the round's fixed
/// increment, known from `GameDef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Call,
    Raise(u32),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "f"),
            Action::Call => write!(f, "c"),
            Action::Raise(to) => write!(f, "r{to}"),
        }
    }
}
