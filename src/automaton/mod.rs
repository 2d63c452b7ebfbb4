//! A multi-pattern searcher based on the [Aho-Corasick algorithm][wikipedia].
//!
//! The implementation reports every occurrence of every pattern, including
//! overlapping and nested ones. All failure handling is compiled into a total
//! transition table, so searching does a single table lookup per symbol.
//!
//! [wikipedia]: https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm

mod build;
mod state;
mod trie;

use std::collections::VecDeque;

pub use self::build::Builder;

use self::state::{State, ROOT, S};
use crate::scan::{Scan, Scanner};
use crate::symbol::{Classes, IntoSymbols, Symbol};
use crate::{Error, Result};

/// A unique identifier for a state in an automaton.
///
/// The root state is always `0`.
pub type StateId = usize;

/// A compiled Aho-Corasick automaton.
///
/// The automaton is immutable once built and can be shared between any number
/// of threads, each scan keeps its own cursor.
///
/// # Examples
///
/// ```
/// use acmatch::AhoCorasick;
///
/// let ac = AhoCorasick::<char>::new(["ab", "bc", "abc"]);
/// let matches: Vec<_> = ac
///     .scan("abcab")
///     .map(|m| (m.pattern_id(), m.start(), m.end()))
///     .collect();
/// assert_eq!(matches, [(0, 0, 1), (2, 0, 2), (1, 1, 2), (0, 3, 4)]);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AhoCorasick<T> {
    /// Maps symbols to columns in the transition table.
    classes: Classes<T>,

    /// The number of columns in the transition table.
    stride: usize,

    /// The total transition table, `stride` entries per state.
    trans: Vec<S>,

    states: Vec<State>,

    /// The pattern table, in insertion order.
    patterns: Vec<Pattern>,
}

/// A pattern in the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct Pattern {
    pub id: usize,
    pub len: usize,
}

impl<T: Symbol> AhoCorasick<T> {
    /// Builds an automaton where each pattern's id is its position.
    ///
    /// Duplicate patterns get their own id and are reported independently.
    pub fn new<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoSymbols<T>,
    {
        let mut builder = Builder::new();
        builder.extend(patterns.into_iter().enumerate());
        // ids are distinct positions so they can never conflict
        builder.compile()
    }

    /// Builds an automaton from `(id, pattern)` pairs.
    ///
    /// Fails if the same id is given to two different patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use acmatch::{AhoCorasick, Error};
    ///
    /// let ac = AhoCorasick::<u8>::build([(10usize, "foo"), (20usize, "bar")])?;
    /// assert_eq!(ac.scan("barfoo").next().map(|m| m.pattern_id()), Some(20));
    ///
    /// let err = AhoCorasick::<u8>::build([(1usize, "foo"), (1usize, "bar")]).unwrap_err();
    /// assert_eq!(err, Error::ConflictingPatternId { id: 1 });
    /// # Ok::<(), acmatch::Error>(())
    /// ```
    pub fn build<I, X, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (X, P)>,
        X: Into<usize>,
        P: IntoSymbols<T>,
    {
        let mut builder = Builder::new();
        builder.extend(patterns);
        builder.build()
    }

    /// Returns a builder to add patterns one by one.
    #[inline]
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    /// Returns a lazy iterator over every match in the haystack.
    ///
    /// Matches are ordered by end position. Matches that end at the same
    /// position are ordered longest first.
    #[inline]
    pub fn scan<H>(&self, haystack: H) -> Scan<'_, T, H::Iter>
    where
        H: IntoSymbols<T>,
    {
        Scan::new(self, haystack.into_symbols())
    }

    /// Returns a scanner that is fed one symbol at a time.
    ///
    /// Use this to search input that is not available all at once, or to stop
    /// a search early.
    #[inline]
    pub fn scan_incremental(&self) -> Scanner<'_, T> {
        Scanner::new(self)
    }

    /// Whether any pattern occurs in the haystack.
    pub fn is_match<H>(&self, haystack: H) -> bool
    where
        H: IntoSymbols<T>,
    {
        self.scan(haystack).next().is_some()
    }

    /// Returns the state that every scan starts in.
    #[inline]
    pub fn start_state(&self) -> StateId {
        ROOT
    }

    /// Returns the number of states.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of distinct pattern ids, including empty patterns.
    #[inline]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the length of the pattern with the given id.
    pub fn pattern_len(&self, id: usize) -> Option<usize> {
        self.patterns.iter().find(|p| p.id == id).map(|p| p.len)
    }

    /// Returns the state reached from `id` on the given symbol.
    ///
    /// # Panics
    ///
    /// If `id` is not a state of this automaton.
    #[inline]
    pub fn next_state(&self, id: StateId, sym: T) -> StateId {
        self.trans[id * self.stride + self.classes.get(sym)]
    }

    /// Returns the failure state of the given state. The root is its own
    /// failure state.
    ///
    /// # Panics
    ///
    /// If `id` is not a state of this automaton.
    #[inline]
    pub fn failure(&self, id: StateId) -> StateId {
        self.state(id).fail
    }

    /// Returns the length of the path from the root to the given state.
    ///
    /// # Panics
    ///
    /// If `id` is not a state of this automaton.
    #[inline]
    pub fn depth(&self, id: StateId) -> usize {
        self.state(id).depth
    }

    /// Returns the ids of the patterns recognized at the given state, longest
    /// first.
    ///
    /// # Panics
    ///
    /// If `id` is not a state of this automaton.
    pub fn outputs(&self, id: StateId) -> impl Iterator<Item = usize> + '_ {
        self.state(id).matches.iter().map(|p| p.id)
    }

    /// Checks the structural invariants of the automaton.
    ///
    /// These always hold for automatons built by this crate, deserialized
    /// automatons are checked automatically.
    ///
    /// - Every transition leads to a state of the automaton.
    /// - The root fails to itself and has no matches.
    /// - Every other state fails to a shallower state, so failure chains
    ///   always end at the root.
    /// - Every state recognizes every pattern its failure state recognizes.
    /// - Every state is reachable from the root along trie edges, and no
    ///   transition goes more than one level deeper.
    /// - Every pattern recognized at a state is a non-empty suffix of its path.
    pub fn validate(&self) -> Result<()> {
        let n = self.states.len();
        if n == 0 {
            return Err(Error::invariant(ROOT, "automaton has no states"));
        }
        if !self.classes.is_valid() || self.classes.len() != self.stride {
            return Err(Error::invariant(ROOT, "malformed symbol classes"));
        }
        if self.trans.len() != n * self.stride {
            return Err(Error::invariant(ROOT, "transition table has the wrong size"));
        }
        if let Some(i) = self.trans.iter().position(|&to| to >= n) {
            return Err(Error::invariant(i / self.stride, "transition out of range"));
        }

        let root = self.state(ROOT);
        if root.fail != ROOT || root.depth != 0 {
            return Err(Error::invariant(ROOT, "root must be its own failure state"));
        }
        if root.is_match() {
            return Err(Error::invariant(ROOT, "root must not have matches"));
        }

        // One symbol can take a scan at most one level deeper, so no state is
        // reached before it has seen `depth` symbols.
        for (i, &to) in self.trans.iter().enumerate() {
            let from = i / self.stride;
            if self.states[to].depth > self.states[from].depth.saturating_add(1) {
                return Err(Error::invariant(from, "transition skips a level"));
            }
        }

        // Recompute depths by walking the trie edges breadth first.
        let mut depths = vec![None; n];
        depths[ROOT] = Some(0);
        let mut queue = VecDeque::from([ROOT]);
        while let Some(from) = queue.pop_front() {
            let depth = self.states[from].depth;
            for &to in &self.trans[from * self.stride..(from + 1) * self.stride] {
                if depths[to].is_none() && self.states[to].depth == depth + 1 {
                    depths[to] = Some(depth + 1);
                    queue.push_back(to);
                }
            }
        }
        if let Some(id) = depths.iter().position(Option::is_none) {
            return Err(Error::invariant(id, "state is not reachable from the root"));
        }

        for (id, state) in self.states.iter().enumerate().skip(1) {
            let fail = match self.states.get(state.fail) {
                Some(fail) => fail,
                None => return Err(Error::invariant(id, "failure state out of range")),
            };
            if fail.depth >= state.depth {
                return Err(Error::invariant(id, "failure state is not shallower"));
            }
            if state.matches.iter().any(|p| p.len == 0 || p.len > state.depth) {
                return Err(Error::invariant(id, "match longer than its state"));
            }
            if !fail.matches.iter().all(|p| state.matches.contains(p)) {
                return Err(Error::invariant(id, "matches are not closed over failure"));
            }
        }
        Ok(())
    }

    pub(crate) fn state(&self, id: S) -> &State {
        &self.states[id]
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for AhoCorasick<T>
where
    T: Symbol + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename = "AhoCorasick")]
        struct Unchecked<T> {
            classes: Classes<T>,
            stride: usize,
            trans: Vec<S>,
            states: Vec<State>,
            patterns: Vec<Pattern>,
        }

        let Unchecked {
            classes,
            stride,
            trans,
            states,
            patterns,
        } = Unchecked::deserialize(deserializer)?;
        let ac = Self {
            classes,
            stride,
            trans,
            states,
            patterns,
        };
        ac.validate().map_err(serde::de::Error::custom)?;
        Ok(ac)
    }
}

impl Pattern {
    pub fn new(id: usize, len: usize) -> Self {
        Self { id, len }
    }
}
