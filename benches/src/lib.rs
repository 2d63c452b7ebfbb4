pub mod corpus;
#[cfg(test)]
mod tests;

/// Abstraction for a multi-pattern matcher.
pub trait Matcher: Sized {
    fn name() -> &'static str;
    fn new(patterns: &[String]) -> Self;
    /// Returns every `(pattern id, start)` pair, including overlapping ones.
    fn find_all(&self, haystack: &str) -> Vec<(usize, usize)>;
}

////////////////////////////////////////////////////////////////////////////////
/// acmatch
////////////////////////////////////////////////////////////////////////////////

pub struct Acmatch(acmatch::AhoCorasick<u8>);

impl Matcher for Acmatch {
    #[inline]
    fn name() -> &'static str {
        "acmatch"
    }

    #[inline]
    fn new(patterns: &[String]) -> Self {
        Self(acmatch::AhoCorasick::new(patterns))
    }

    #[inline]
    fn find_all(&self, haystack: &str) -> Vec<(usize, usize)> {
        self.0
            .scan(haystack)
            .map(|m| (m.pattern_id(), m.start()))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////
/// acmatch, searching by char
////////////////////////////////////////////////////////////////////////////////

pub struct AcmatchChars(acmatch::AhoCorasick<char>);

impl Matcher for AcmatchChars {
    #[inline]
    fn name() -> &'static str {
        "acmatch-chars"
    }

    #[inline]
    fn new(patterns: &[String]) -> Self {
        Self(acmatch::AhoCorasick::new(patterns))
    }

    #[inline]
    fn find_all(&self, haystack: &str) -> Vec<(usize, usize)> {
        // the corpus is ASCII so code point and byte positions agree
        self.0
            .scan(haystack)
            .map(|m| (m.pattern_id(), m.start()))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////
/// aho-corasick
////////////////////////////////////////////////////////////////////////////////

pub struct AhoCorasick(aho_corasick::AhoCorasick);

impl Matcher for AhoCorasick {
    #[inline]
    fn name() -> &'static str {
        "aho-corasick"
    }

    #[inline]
    fn new(patterns: &[String]) -> Self {
        Self(aho_corasick::AhoCorasick::new(patterns).unwrap())
    }

    #[inline]
    fn find_all(&self, haystack: &str) -> Vec<(usize, usize)> {
        self.0
            .find_overlapping_iter(haystack)
            .map(|m| (m.pattern().as_usize(), m.start()))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////
/// kmp, one pass per pattern
////////////////////////////////////////////////////////////////////////////////

pub struct Kmp(Vec<acmatch::kmp::Kmp<u8>>);

impl Matcher for Kmp {
    #[inline]
    fn name() -> &'static str {
        "kmp"
    }

    #[inline]
    fn new(patterns: &[String]) -> Self {
        Self(patterns.iter().map(acmatch::kmp::Kmp::new).collect())
    }

    #[inline]
    fn find_all(&self, haystack: &str) -> Vec<(usize, usize)> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(id, kmp)| kmp.find_all(haystack).into_iter().map(move |i| (id, i)))
            .collect()
    }
}
