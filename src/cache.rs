//! Reusing scan results for repeated queries.
//!
//! A [`Query`] bundles a pattern set with a text. Its [`Fingerprint`] keys a
//! caller-owned [`ResultCache`], and [`run_cached`] only scans on a miss.
//!
//! ```
//! use acmatch::cache::{self, MemoryCache, Query};
//!
//! let mut cache = MemoryCache::new();
//! let query = Query::substring("ABA", "ABABDABACDABABCABAB");
//!
//! let first = cache::run_cached(&query, &mut cache);
//! let again = cache::run_cached(&query, &mut cache);
//! assert_eq!(first, again);
//! assert_eq!((cache.hits(), cache.misses()), (1, 1));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

use crate::{AhoCorasick, Match};

/// What a query asks for.
///
/// The kind is metadata only, every kind is answered by the same automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueryKind {
    /// Occurrences of a single pattern.
    Substring,
    /// Occurrences of every pattern in a set.
    Multi,
}

/// A pattern set and the text to search.
///
/// Pattern ids are positions in `patterns`. Texts are searched by `char`, so
/// match positions count code points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub kind: QueryKind,
    pub patterns: Vec<String>,
    pub text: String,
}

impl Query {
    /// A query for a single pattern.
    pub fn substring(pattern: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Substring,
            patterns: vec![pattern.into()],
            text: text.into(),
        }
    }

    /// A query for a set of patterns.
    pub fn multi<I, P>(patterns: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            kind: QueryKind::Multi,
            patterns: patterns.into_iter().map(Into::into).collect(),
            text: text.into(),
        }
    }

    /// Returns the fingerprint of this query.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(self)
    }

    /// Scans the text, without any caching.
    pub fn run(&self) -> Vec<Match> {
        AhoCorasick::<char>::new(&self.patterns)
            .scan(&self.text)
            .collect()
    }
}

/// A 64-bit digest identifying a query.
///
/// Computed with FNV-1a over the kind, the patterns and the text, each
/// length-prefixed, so it is stable across runs and platforms. Different
/// queries can still collide, caches that cannot tolerate that should compare
/// the stored query as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Computes the fingerprint of the query.
    pub fn of(query: &Query) -> Self {
        let mut h = Fnv1a::new();
        h.write_u8(match query.kind {
            QueryKind::Substring => 0,
            QueryKind::Multi => 1,
        });
        h.write_u64(query.patterns.len() as u64);
        for pattern in &query.patterns {
            h.write_u64(pattern.len() as u64);
            h.write(pattern.as_bytes());
        }
        h.write_u64(query.text.len() as u64);
        h.write(query.text.as_bytes());
        Self(h.finish())
    }

    /// The raw digest.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

struct Fnv1a(u64);

impl Fnv1a {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self(Self::OFFSET)
    }
}

impl Hasher for Fnv1a {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
    }

    // Fixed width and byte order regardless of platform.
    fn write_u64(&mut self, n: u64) {
        self.write(&n.to_le_bytes());
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// A store for previously computed scan results.
///
/// The cache is owned by the caller and passed to [`run_cached`] explicitly.
pub trait ResultCache {
    /// Returns the stored matches for the fingerprint.
    fn get(&mut self, key: Fingerprint) -> Option<Vec<Match>>;

    /// Stores the matches for the fingerprint.
    fn put(&mut self, key: Fingerprint, matches: Vec<Match>);
}

/// An in-memory [`ResultCache`] that counts its hits and misses.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    map: HashMap<Fingerprint, Vec<Match>>,
    hits: u64,
    misses: u64,
}

impl MemoryCache {
    /// Construct a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored results.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The number of lookups that found a stored result.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// The number of lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Removes every stored result. The counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl ResultCache for MemoryCache {
    fn get(&mut self, key: Fingerprint) -> Option<Vec<Match>> {
        let found = self.map.get(&key).cloned();
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    fn put(&mut self, key: Fingerprint, matches: Vec<Match>) {
        self.map.insert(key, matches);
    }
}

impl<S: BuildHasher> ResultCache for HashMap<Fingerprint, Vec<Match>, S> {
    fn get(&mut self, key: Fingerprint) -> Option<Vec<Match>> {
        HashMap::get(self, &key).cloned()
    }

    fn put(&mut self, key: Fingerprint, matches: Vec<Match>) {
        self.insert(key, matches);
    }
}

impl ResultCache for BTreeMap<Fingerprint, Vec<Match>> {
    fn get(&mut self, key: Fingerprint) -> Option<Vec<Match>> {
        BTreeMap::get(self, &key).cloned()
    }

    fn put(&mut self, key: Fingerprint, matches: Vec<Match>) {
        self.insert(key, matches);
    }
}

/// Returns the matches for the query, scanning only if the cache has no
/// result for its fingerprint.
pub fn run_cached<C>(query: &Query, cache: &mut C) -> Vec<Match>
where
    C: ResultCache + ?Sized,
{
    let key = query.fingerprint();
    if let Some(matches) = cache.get(key) {
        tracing::debug!(%key, kind = ?query.kind, "cache hit");
        return matches;
    }
    tracing::debug!(%key, kind = ?query.kind, "cache miss");
    let matches = query.run();
    cache.put(key, matches.clone());
    matches
}

/// Runs every query through the cache, returning the results in query order.
pub fn run_all<'q, I, C>(queries: I, cache: &mut C) -> Vec<(Fingerprint, Vec<Match>)>
where
    I: IntoIterator<Item = &'q Query>,
    C: ResultCache + ?Sized,
{
    queries
        .into_iter()
        .map(|query| (query.fingerprint(), run_cached(query, cache)))
        .collect()
}
