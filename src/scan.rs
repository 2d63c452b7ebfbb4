//! Driving symbols through a compiled automaton.

use std::iter::FusedIterator;
use std::ops::Range;
use std::slice;

use crate::automaton::{AhoCorasick, Pattern, StateId};
use crate::symbol::Symbol;

/// A single occurrence of a pattern in a haystack.
///
/// Positions count symbols, not bytes, when scanning by `char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Match {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pattern: Pattern,
    end: usize,
}

impl Match {
    /// The id of the pattern that matched.
    #[inline]
    pub fn pattern_id(&self) -> usize {
        self.pattern.id
    }

    /// The position of the first symbol of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.end + 1 - self.pattern.len
    }

    /// The position of the last symbol of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The number of symbols in the match.
    #[inline]
    pub fn len(&self) -> usize {
        self.pattern.len
    }

    /// Always `false`, empty patterns never match.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pattern.len == 0
    }

    /// The half-open range of positions covered by the match.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end + 1
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Match {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(rename = "Match")]
        struct Unchecked {
            id: usize,
            len: usize,
            end: usize,
        }

        let Unchecked { id, len, end } = Unchecked::deserialize(deserializer)?;
        if len == 0 || len - 1 > end {
            return Err(serde::de::Error::custom(format_args!(
                "match length {len} does not fit before end {end}"
            )));
        }
        Ok(Self {
            pattern: Pattern::new(id, len),
            end,
        })
    }
}

/// A lazy iterator over every match in a haystack.
///
/// This struct is created by [`AhoCorasick::scan`].
#[derive(Debug, Clone)]
pub struct Scan<'a, T, I> {
    scanner: Scanner<'a, T>,
    symbols: I,
    pending: Matches<'a>,
}

impl<'a, T, I> Scan<'a, T, I>
where
    T: Symbol,
    I: Iterator<Item = T>,
{
    pub(crate) fn new(ac: &'a AhoCorasick<T>, symbols: I) -> Self {
        Self {
            scanner: Scanner::new(ac),
            symbols,
            pending: Matches::empty(),
        }
    }
}

impl<'a, T, I> Iterator for Scan<'a, T, I>
where
    T: Symbol,
    I: Iterator<Item = T>,
{
    type Item = Match;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.pending.next() {
                return Some(m);
            }
            let sym = self.symbols.next()?;
            self.pending = self.scanner.feed(sym);
        }
    }
}

/// Searches input that arrives one symbol at a time.
///
/// The scanner only holds a cursor into the automaton, so any number of them
/// can run against the same automaton at once.
///
/// This struct is created by [`AhoCorasick::scan_incremental`].
///
/// # Examples
///
/// ```
/// use acmatch::AhoCorasick;
///
/// let ac = AhoCorasick::<u8>::new(["needle"]);
/// let mut scanner = ac.scan_incremental();
///
/// let mut found = None;
/// for chunk in ["hay nee", "dle hay"] {
///     for &byte in chunk.as_bytes() {
///         if let Some(m) = scanner.feed(byte).next() {
///             found = Some(m.range());
///             break;
///         }
///     }
/// }
/// assert_eq!(found, Some(4..10));
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a, T> {
    ac: &'a AhoCorasick<T>,
    state: StateId,
    pos: usize,
}

impl<'a, T: Symbol> Scanner<'a, T> {
    pub(crate) fn new(ac: &'a AhoCorasick<T>) -> Self {
        Self {
            ac,
            state: ac.start_state(),
            pos: 0,
        }
    }

    /// Consumes one symbol and returns the matches that end at it.
    #[inline]
    pub fn feed(&mut self, sym: T) -> Matches<'a> {
        self.state = self.ac.next_state(self.state, sym);
        let end = self.pos;
        self.pos += 1;
        let ac: &'a AhoCorasick<T> = self.ac;
        Matches {
            iter: ac.state(self.state).matches.iter(),
            end,
        }
    }

    /// Returns to the start state, as if no symbols had been fed.
    #[inline]
    pub fn reset(&mut self) {
        self.state = self.ac.start_state();
        self.pos = 0;
    }

    /// The number of symbols fed since creation or the last reset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The current state in the automaton.
    #[inline]
    pub fn state(&self) -> StateId {
        self.state
    }
}

/// The matches that end at a single position.
///
/// This struct is created by [`Scanner::feed`].
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    iter: slice::Iter<'a, Pattern>,
    end: usize,
}

impl Matches<'_> {
    fn empty() -> Self {
        Self {
            iter: (&[] as &[Pattern]).iter(),
            end: 0,
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = Match;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|&pattern| Match {
            pattern,
            end: self.end,
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Matches<'_> {}

impl FusedIterator for Matches<'_> {}
