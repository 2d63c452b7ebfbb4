use crate::{corpus, Acmatch, AcmatchChars, AhoCorasick, Kmp, Matcher};

macro_rules! t {
    ($M:ty) => {{
        let patterns = fixed_patterns();
        let mut got = <$M as Matcher>::new(&patterns).find_all(HAYSTACK);
        got.sort_unstable();
        assert_eq!(got, expected(&patterns, HAYSTACK), "{}", <$M as Matcher>::name());
    }};
}

const HAYSTACK: &str = "ushers and his sheep she sells seashells by the seashore";

fn fixed_patterns() -> Vec<String> {
    ["he", "she", "his", "hers", "sea", "shell", "s", "seashore"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn expected(patterns: &[String], haystack: &str) -> Vec<(usize, usize)> {
    let mut all = Vec::new();
    for (id, p) in patterns.iter().enumerate() {
        for start in 0..haystack.len() {
            if haystack[start..].starts_with(p.as_str()) {
                all.push((id, start));
            }
        }
    }
    all.sort_unstable();
    all
}

#[test]
fn acmatch() {
    t!(Acmatch);
}

#[test]
fn acmatch_chars() {
    t!(AcmatchChars);
}

#[test]
fn aho_corasick() {
    t!(AhoCorasick);
}

#[test]
fn kmp() {
    t!(Kmp);
}

#[test]
fn random_corpus_agrees() {
    let patterns = corpus::patterns(50, 4);
    let haystack = corpus::haystack(10_000, 4, &patterns);
    let mut exp = AhoCorasick::new(&patterns).find_all(&haystack);
    exp.sort_unstable();
    let mut got = Acmatch::new(&patterns).find_all(&haystack);
    got.sort_unstable();
    assert_eq!(got, exp);
}
