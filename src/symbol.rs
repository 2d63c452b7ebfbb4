//! The discrete units that patterns and haystacks are made of.

use std::fmt;
use std::iter::Copied;
use std::slice;
use std::str::{Bytes, Chars};
use std::vec;

/// A single symbol in a pattern or haystack.
///
/// Any small, totally ordered, copyable type can be a symbol. Bytes form a
/// closed alphabet and get a direct lookup table in the compiled automaton,
/// other types are looked up with a binary search over the symbols that
/// actually occur in the patterns.
pub trait Symbol: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// The size of the alphabet if it is closed and small enough to index a
    /// table directly.
    const CLOSED_LEN: Option<usize> = None;

    /// The position of this symbol in a closed alphabet.
    ///
    /// Only called when [`Symbol::CLOSED_LEN`] is `Some`.
    #[inline]
    fn ordinal(self) -> usize {
        0
    }
}

impl Symbol for u8 {
    const CLOSED_LEN: Option<usize> = Some(256);

    #[inline]
    fn ordinal(self) -> usize {
        self as usize
    }
}

impl Symbol for char {}

impl Symbol for u16 {}

impl Symbol for u32 {}

/// Types that can be turned into a sequence of symbols.
///
/// Implemented for common string and sequence types so that patterns and
/// haystacks can be passed directly. Strings are sequences of both `char` and
/// `u8`, the automaton's symbol type decides which one is used.
pub trait IntoSymbols<T: Symbol> {
    /// The iterator over the symbols.
    type Iter: Iterator<Item = T>;

    /// Returns an iterator over the symbols.
    fn into_symbols(self) -> Self::Iter;
}

// String types → char

impl<'a> IntoSymbols<char> for &'a str {
    type Iter = Chars<'a>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.chars()
    }
}

impl<'a> IntoSymbols<char> for &'a String {
    type Iter = Chars<'a>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.chars()
    }
}

impl<'a, 'b> IntoSymbols<char> for &'a &'b str {
    type Iter = Chars<'b>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.chars()
    }
}

// String types → u8

impl<'a> IntoSymbols<u8> for &'a str {
    type Iter = Bytes<'a>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.bytes()
    }
}

impl<'a> IntoSymbols<u8> for &'a String {
    type Iter = Bytes<'a>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.bytes()
    }
}

impl<'a, 'b> IntoSymbols<u8> for &'a &'b str {
    type Iter = Bytes<'b>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.bytes()
    }
}

// Generic sequence types → T

impl<'a, T: Symbol> IntoSymbols<T> for &'a [T] {
    type Iter = Copied<slice::Iter<'a, T>>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<'a, T: Symbol, const N: usize> IntoSymbols<T> for &'a [T; N] {
    type Iter = Copied<slice::Iter<'a, T>>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<'a, T: Symbol> IntoSymbols<T> for &'a Vec<T> {
    type Iter = Copied<slice::Iter<'a, T>>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<T: Symbol> IntoSymbols<T> for Vec<T> {
    type Iter = vec::IntoIter<T>;

    #[inline]
    fn into_symbols(self) -> Self::Iter {
        self.into_iter()
    }
}

/// Maps every symbol to an equivalence class.
///
/// Each distinct symbol used by some pattern gets its own class starting at
/// one. Every other symbol falls into class zero, which never leaves the
/// root, so a table with one column per class is total for any alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum Classes<T> {
    /// A class for every ordinal of a closed alphabet.
    Dense(Box<[u32]>),
    /// The sorted, distinct pattern symbols. The class of `symbols[i]` is `i + 1`.
    Sparse(Vec<T>),
}

impl<T: Symbol> Classes<T> {
    /// Builds the classes from the sorted, distinct symbols used by the
    /// patterns.
    pub fn new(symbols: Vec<T>) -> Self {
        debug_assert!(symbols.windows(2).all(|w| w[0] < w[1]));
        match T::CLOSED_LEN {
            Some(len) => {
                let mut table = vec![0; len].into_boxed_slice();
                for (i, sym) in symbols.iter().enumerate() {
                    table[sym.ordinal()] = (i + 1) as u32;
                }
                Self::Dense(table)
            }
            None => Self::Sparse(symbols),
        }
    }

    /// Returns the class of the given symbol.
    #[inline]
    pub fn get(&self, sym: T) -> usize {
        match self {
            Self::Dense(table) => table[sym.ordinal()] as usize,
            Self::Sparse(symbols) => match symbols.binary_search(&sym) {
                Ok(i) => i + 1,
                Err(_) => 0,
            },
        }
    }

    /// The number of classes, including the class for unused symbols.
    pub fn len(&self) -> usize {
        match self {
            Self::Dense(table) => table.iter().copied().max().unwrap_or(0) as usize + 1,
            Self::Sparse(symbols) => symbols.len() + 1,
        }
    }

    /// Checks that the classes are well formed for this symbol type.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Dense(table) => {
                if T::CLOSED_LEN != Some(table.len()) {
                    return false;
                }
                // Classes must be numbered 1..=k without gaps or repeats.
                let mut used: Vec<u32> = table.iter().copied().filter(|&c| c != 0).collect();
                used.sort_unstable();
                used.iter().enumerate().all(|(i, &c)| c as usize == i + 1)
            }
            Self::Sparse(symbols) => {
                T::CLOSED_LEN.is_none() && symbols.windows(2).all(|w| w[0] < w[1])
            }
        }
    }
}
