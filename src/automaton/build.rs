//! A builder for an Aho-Corasick automaton.
//!
//! From the given set of patterns we build a state machine with a transition
//! for every possible symbol out of every state. This state machine can then be
//! used to search a haystack for all of the patterns simultaneously.
//!
//! Consider building an automaton from the patterns 'ab' and 'cd'. The trie
//! would look like the following, where states are represented as `S?` and
//! have an asterisk (`*`) if there are any matches at that state.
//!
//! ```text
//!      a - S1 - b - S2*
//!     /
//! S0 - c - S3 - d - S4*
//! ```
//!
//! Now consider the patterns 'abe' and 'bcd' and the haystack 'abcd'. At S2 we
//! fail to find a transition on 'c', but 'b' is also a prefix of 'bcd', so the
//! search can continue from S4. That is the failure transition of S2. Every
//! state has one, most of them simply lead back to the root.
//!
//! ```text
//!      a - S1 - b - S2 - e - S3*
//!     /             /
//!    /       -------
//!   /       /
//! S0 - b - S4 - c - S5 - d - S6*
//! ```
//!
//! Failure transitions are computed with a breadth-first search starting with
//! all transitions out of the root. For each state and each of its trie edges
//! we follow the failure transitions backward until we find a state that has a
//! forward transition on the same symbol. Where that transition leads is the
//! failure state of the edge's target. Since the search goes by depth, every
//! failure state is finished before it is used, which lets us:
//!
//! - copy its matches into the new state, so a state reports every pattern that
//!   is a suffix of its path, and
//! - copy its transitions into every missing transition of the new state, so
//!   the final table is total and searching never walks failure transitions.

use std::collections::{BTreeMap, VecDeque};

use super::state::{State, FAIL, ROOT, S};
use super::trie::{Node, Trie};
use super::{AhoCorasick, Pattern};
use crate::symbol::{Classes, IntoSymbols, Symbol};
use crate::{Error, Result};

/// Collects patterns and compiles them into an [`AhoCorasick`] automaton.
///
/// # Examples
///
/// ```
/// use acmatch::Builder;
///
/// let mut builder = Builder::<char>::new();
/// builder.insert(7usize, "he").insert(3usize, "she");
/// let ac = builder.build()?;
///
/// let matches: Vec<_> = ac
///     .scan("ushers")
///     .map(|m| (m.pattern_id(), m.end()))
///     .collect();
/// assert_eq!(matches, [(3, 3), (7, 3)]);
/// # Ok::<(), acmatch::Error>(())
/// ```
#[derive(Debug)]
pub struct Builder<T> {
    trie: Trie<T>,
    /// The state where the pattern with each id ends.
    ids: BTreeMap<usize, S>,
    /// The pattern table, in insertion order.
    patterns: Vec<Pattern>,
    /// The first id that was reused for a different pattern.
    conflict: Option<usize>,
}

impl<T: Symbol> Default for Builder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Symbol> Builder<T> {
    /// Construct a new builder with no patterns.
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            ids: BTreeMap::new(),
            patterns: Vec::new(),
            conflict: None,
        }
    }

    /// Adds a pattern with the given id.
    ///
    /// Adding the same pattern again under the same id does nothing. Adding a
    /// different pattern under an id that is already taken leaves the builder
    /// unchanged and makes [`.build()`][Builder::build] fail.
    ///
    /// Empty patterns are accepted and take up their id, but they never match.
    pub fn insert<X, P>(&mut self, id: X, pattern: P) -> &mut Self
    where
        X: Into<usize>,
        P: IntoSymbols<T>,
    {
        let id = id.into();
        let symbols: Vec<T> = pattern.into_symbols().collect();
        match self.ids.get(&id) {
            Some(&end) => {
                if self.trie.find(&symbols) != Some(end) {
                    tracing::debug!(id, "pattern id reused for a different pattern");
                    self.conflict.get_or_insert(id);
                }
            }
            None => {
                let end = self.trie.insert(&symbols, id);
                self.ids.insert(id, end);
                self.patterns.push(Pattern::new(id, symbols.len()));
            }
        }
        self
    }

    /// Adds every `(id, pattern)` pair.
    pub fn extend<I, X, P>(&mut self, patterns: I) -> &mut Self
    where
        I: IntoIterator<Item = (X, P)>,
        X: Into<usize>,
        P: IntoSymbols<T>,
    {
        for (id, pattern) in patterns {
            self.insert(id, pattern);
        }
        self
    }

    /// Compiles the patterns into an automaton.
    ///
    /// Fails if some pattern id was given to two different patterns.
    pub fn build(self) -> Result<AhoCorasick<T>> {
        if let Some(id) = self.conflict {
            return Err(Error::ConflictingPatternId { id });
        }
        Ok(self.compile())
    }

    /// Compiles the patterns, ignoring any conflicting ids.
    pub(crate) fn compile(self) -> AhoCorasick<T> {
        let Self {
            trie,
            ids: _,
            patterns,
            conflict: _,
        } = self;

        let classes = Classes::new(trie.symbols());
        let stride = classes.len();
        let mut trans = vec![FAIL; trie.len() * stride];

        let mut edges = Vec::with_capacity(trie.len());
        let mut states = Vec::with_capacity(trie.len());
        for (id, node) in trie.into_nodes().into_iter().enumerate() {
            let Node {
                edges: explicit,
                matches,
                depth,
            } = node;
            for &(sym, next) in &explicit {
                trans[id * stride + classes.get(sym)] = next;
            }
            edges.push(explicit);
            states.push(State {
                fail: ROOT,
                matches,
                depth,
            });
        }

        // Empty patterns end at the root. If they stayed there they would be
        // copied into every state through the failure transitions.
        let empty = std::mem::take(&mut states[ROOT].matches);
        if !empty.is_empty() {
            tracing::debug!(count = empty.len(), "empty patterns never match");
        }

        let mut compiler = Compiler {
            stride,
            trans,
            states,
            edges,
        };
        compiler.fill_root_transitions();
        compiler.fill_failure_transitions();
        let Compiler { trans, states, .. } = compiler;

        tracing::debug!(
            states = states.len(),
            patterns = patterns.len(),
            classes = stride,
            "compiled automaton"
        );

        AhoCorasick {
            classes,
            stride,
            trans,
            states,
            patterns,
        }
    }
}

struct Compiler<T> {
    stride: usize,
    trans: Vec<S>,
    states: Vec<State>,
    edges: Vec<Vec<(T, S)>>,
}

impl<T: Symbol> Compiler<T> {
    /// Set the missing transitions out of the root to loop back to the root.
    /// This is what makes every failure walk terminate.
    fn fill_root_transitions(&mut self) {
        for class in 0..self.stride {
            if self.trans[class] == FAIL {
                self.trans[class] = ROOT;
            }
        }
    }

    fn fill_failure_transitions(&mut self) {
        // Initialize the queue for breadth first search with all trie edges
        // out of the root. The root's self transitions are never followed,
        // otherwise this would not terminate.
        let mut queue: VecDeque<S> = self.edges[ROOT].iter().map(|&(_, next)| next).collect();

        while let Some(curr) = queue.pop_front() {
            // The failure state is shallower so it was dequeued earlier and
            // its row is already total.
            let curr_fail = self.states[curr].fail;
            for class in 0..self.stride {
                let i = curr * self.stride + class;
                if self.trans[i] == FAIL {
                    self.trans[i] = self.trans[curr_fail * self.stride + class];
                }
            }

            for e in 0..self.edges[curr].len() {
                let (sym, next) = self.edges[curr][e];
                let fail = {
                    let mut id = curr_fail;
                    loop {
                        if let Some(to) = self.explicit(id, sym) {
                            break to;
                        }
                        if id == ROOT {
                            break ROOT;
                        }
                        id = self.states[id].fail;
                    }
                };
                self.states[next].fail = fail;
                self.copy_matches(fail, next);
                queue.push_back(next);
            }
        }
    }

    fn explicit(&self, id: S, sym: T) -> Option<S> {
        let edges = &self.edges[id];
        edges
            .binary_search_by(|&(s, _)| s.cmp(&sym))
            .ok()
            .map(|i| edges[i].1)
    }

    fn copy_matches(&mut self, src: S, dst: S) {
        debug_assert!(src != dst, "src {src} must not be equal to dst {dst}");

        // Simply gets a mutable reference to both states.
        let i = src;
        let j = dst;
        let (src, dst) = if i < j {
            let (left, right) = self.states.split_at_mut(j);
            (&left[i], &mut right[0])
        } else {
            let (left, right) = self.states.split_at_mut(i);
            (&right[0], &mut left[j])
        };

        dst.matches.extend_from_slice(&src.matches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_conflicting_id() {
        let mut builder = Builder::<u8>::new();
        builder.insert(0usize, "ab").insert(0usize, "cd");
        let err = builder.build().unwrap_err();
        assert_eq!(err, Error::ConflictingPatternId { id: 0 });
    }

    #[test]
    fn builder_conflict_leaves_trie_untouched() {
        let mut builder = Builder::<u8>::new();
        builder.insert(0usize, "ab").insert(0usize, "xyz");
        assert_eq!(builder.trie.len(), 3);
        assert_eq!(builder.conflict, Some(0));
    }

    #[test]
    fn builder_same_id_same_pattern() {
        let mut builder = Builder::<u8>::new();
        builder.insert(0usize, "ab").insert(0usize, "ab");
        let ac = builder.build().unwrap();
        assert_eq!(ac.pattern_count(), 1);
        assert_eq!(ac.scan("abab").count(), 2);
    }

    #[test]
    fn builder_empty_pattern_conflict() {
        let mut builder = Builder::<u8>::new();
        builder.insert(1usize, "").insert(1usize, "a");
        assert!(builder.build().is_err());
    }

    #[test]
    fn builder_extend() {
        let mut builder = Builder::<char>::new();
        builder.extend([(2usize, "b"), (1usize, "a")]);
        let ac = builder.build().unwrap();
        let ids: Vec<_> = ac.scan("ab").map(|m| m.pattern_id()).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn compile_failure_transitions() {
        // S0 -a-> S1 -b-> S2 -e-> S3, S0 -b-> S4 -c-> S5 -d-> S6
        let mut builder = Builder::<u8>::new();
        builder.insert(0usize, "abe").insert(1usize, "bcd");
        let ac = builder.build().unwrap();
        assert_eq!(ac.state_count(), 7);
        assert_eq!(ac.failure(1), ROOT);
        assert_eq!(ac.failure(2), 4);
        assert_eq!(ac.failure(3), ROOT);
        assert_eq!(ac.failure(4), ROOT);
        assert_eq!(ac.failure(5), ROOT);
        // the missing transition out of S2 on 'c' is inherited from S4
        assert_eq!(ac.next_state(2, b'c'), 5);
        assert_eq!(ac.next_state(2, b'a'), 1);
        assert_eq!(ac.next_state(2, b'z'), ROOT);
    }

    #[test]
    fn compile_output_closure() {
        let ac = AhoCorasick::<char>::new(["ab", "bc", "abc", "c"]);
        let abc = ac.start_state();
        let abc = "abc".chars().fold(abc, |s, c| ac.next_state(s, c));
        let outputs: Vec<_> = ac.outputs(abc).collect();
        assert_eq!(outputs, [2, 1, 3]);
    }

    #[test]
    fn compile_is_deterministic() {
        let a = AhoCorasick::<char>::new(["she", "he", "hers", "his"]);
        let b = AhoCorasick::<char>::new(["she", "he", "hers", "his"]);
        assert_eq!(a.trans, b.trans);
        assert_eq!(a.states, b.states);
    }
}
