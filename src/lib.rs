//! Find every occurrence of many patterns in a single pass.
//!
//! # Features
//!
//! - Reports all matches, including overlapping and nested ones
//! - One table lookup per symbol, no backtracking while searching
//! - Works on bytes, `char`s or any small ordered token type
//! - Search a whole haystack lazily or feed input one symbol at a time
//! - Immutable automatons that can be shared freely between threads
//! - Optional [`serde`] support to persist compiled automatons and results
//!
//! # Getting started
//!
//! Your entry point is the [`AhoCorasick`] struct. It is compiled once from a
//! fixed set of patterns, each pattern's id is its position.
//!
//! ```
//! use acmatch::AhoCorasick;
//!
//! let ac = AhoCorasick::<char>::new(["ab", "bc", "abc"]);
//! ```
//!
//! Then [`.scan`][AhoCorasick::scan] returns an iterator over every match.
//! Each [`Match`] carries the pattern id and the position of its last symbol.
//!
//! ```
//! # let ac = acmatch::AhoCorasick::<char>::new(["ab", "bc", "abc"]);
//! let matches: Vec<_> = ac
//!     .scan("abcabcab")
//!     .map(|m| (m.pattern_id(), m.end()))
//!     .collect();
//!
//! assert_eq!(
//!     matches,
//!     [(0, 1), (2, 2), (1, 2), (0, 4), (2, 5), (1, 5), (0, 7)]
//! );
//! ```
//!
//! # Examples
//!
//! ### Choose your own pattern ids
//!
//! Use [`AhoCorasick::build`] or a [`Builder`] to give patterns explicit ids.
//! Reusing an id for a different pattern is an error.
//!
//! ```
//! use acmatch::AhoCorasick;
//!
//! let ac = AhoCorasick::<u8>::build([(404usize, "not found"), (500usize, "error")])?;
//! let ids: Vec<_> = ac.scan("error: not found").map(|m| m.pattern_id()).collect();
//! assert_eq!(ids, [500, 404]);
//! # Ok::<(), acmatch::Error>(())
//! ```
//!
//! ### Search a stream
//!
//! A [`Scanner`] is fed one symbol at a time and can be stopped or reset at any
//! point.
//!
//! ```
//! use acmatch::AhoCorasick;
//!
//! let ac = AhoCorasick::<u8>::new(["GATTACA"]);
//! let mut scanner = ac.scan_incremental();
//!
//! let mut hits = Vec::new();
//! for chunk in [&b"TTGAT"[..], b"TACAGATTACA"] {
//!     for &base in chunk {
//!         hits.extend(scanner.feed(base).map(|m| m.start()));
//!     }
//! }
//! assert_eq!(hits, [2, 9]);
//! ```
//!
//! ### Search tokens
//!
//! Any [`Symbol`] can be used, for example token ids.
//!
//! ```
//! use acmatch::AhoCorasick;
//!
//! let ac = AhoCorasick::<u32>::new([vec![7, 7], vec![7, 1]]);
//! let n = ac.scan(&[7u32, 7, 7, 1]).count();
//! assert_eq!(n, 3);
//! ```

mod automaton;
pub mod cache;
mod error;
pub mod kmp;
mod scan;
mod symbol;

pub use crate::automaton::{AhoCorasick, Builder, StateId};
pub use crate::error::{Error, Result};
pub use crate::scan::{Match, Matches, Scan, Scanner};
pub use crate::symbol::{IntoSymbols, Symbol};
