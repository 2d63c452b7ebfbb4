use super::Pattern;

/// A unique identifier for a state.
pub type S = usize;

/// The identifier for an automaton's root state.
pub const ROOT: S = 0;

/// Marks a missing transition while the table is being filled in. A compiled
/// automaton never contains it.
pub const FAIL: S = S::MAX;

/// A state in a compiled Aho-Corasick automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    /// The failure transition.
    pub fail: S,

    /// The patterns that are matched at this state, longest first.
    pub matches: Vec<Pattern>,

    /// The distance from the root state in the trie.
    pub depth: usize,
}

impl State {
    /// Whether or not this state contains any matches.
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }
}
