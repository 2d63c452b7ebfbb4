//! A single pattern searcher based on the [Knuth-Morris-Pratt algorithm][wikipedia].
//!
//! This is the one-pattern special case of the automaton. It is kept as an
//! independent implementation to cross-check [`AhoCorasick`] and as a baseline
//! in benchmarks.
//!
//! [wikipedia]: https://en.wikipedia.org/wiki/Knuth%E2%80%93Morris%E2%80%93Pratt_algorithm
//! [`AhoCorasick`]: crate::AhoCorasick

use crate::symbol::{IntoSymbols, Symbol};

/// A compiled single pattern.
///
/// # Examples
///
/// ```
/// use acmatch::kmp::Kmp;
///
/// let kmp = Kmp::<u8>::new("ABA");
/// assert_eq!(kmp.find_all("ABABDABACDABABCABAB"), [0, 5, 10, 15]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kmp<T> {
    pattern: Vec<T>,
    /// `lps[i]` is the length of the longest proper prefix of `pattern[..=i]`
    /// that is also a suffix of it.
    lps: Vec<usize>,
}

impl<T: Symbol> Kmp<T> {
    /// Compiles the pattern.
    pub fn new<P>(pattern: P) -> Self
    where
        P: IntoSymbols<T>,
    {
        let pattern: Vec<T> = pattern.into_symbols().collect();
        let lps = failure_table(&pattern);
        Self { pattern, lps }
    }

    /// The longest-proper-prefix-suffix table of the pattern.
    pub fn failure_table(&self) -> &[usize] {
        &self.lps
    }

    /// Returns the start position of every occurrence of the pattern,
    /// including overlapping ones.
    ///
    /// An empty pattern never matches.
    pub fn find_all<H>(&self, haystack: H) -> Vec<usize>
    where
        H: IntoSymbols<T>,
    {
        let m = self.pattern.len();
        let mut positions = Vec::new();
        if m == 0 {
            return positions;
        }

        let mut j = 0;
        for (i, sym) in haystack.into_symbols().enumerate() {
            while j > 0 && self.pattern[j] != sym {
                j = self.lps[j - 1];
            }
            if self.pattern[j] == sym {
                j += 1;
            }
            if j == m {
                positions.push(i + 1 - m);
                j = self.lps[j - 1];
            }
        }
        positions
    }
}

/// Computes the longest-proper-prefix-suffix table for the pattern.
pub fn failure_table<T: Eq>(pattern: &[T]) -> Vec<usize> {
    let mut lps = vec![0; pattern.len()];
    let mut j = 0;
    for i in 1..pattern.len() {
        while j > 0 && pattern[i] != pattern[j] {
            j = lps[j - 1];
        }
        if pattern[i] == pattern[j] {
            j += 1;
        }
        lps[i] = j;
    }
    lps
}
