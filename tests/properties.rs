use std::collections::BTreeSet;

use proptest::prelude::*;

use acmatch::kmp::Kmp;
use acmatch::AhoCorasick;

fn patterns() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc]{0,6}", 0..8)
}

fn text() -> impl Strategy<Value = String> {
    "[abcd]{0,40}"
}

/// Every (pattern id, end) pair found by brute force, in the order the
/// automaton reports them: by end, then longest first, then by id.
fn naive(patterns: &[String], text: &str) -> Vec<(usize, usize)> {
    let text = text.as_bytes();
    let mut found = Vec::new();
    for end in 0..text.len() {
        let mut here: Vec<_> = patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty() && text[..=end].ends_with(p.as_bytes()))
            .map(|(id, p)| (p.len(), id))
            .collect();
        here.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        found.extend(here.into_iter().map(|(_, id)| (id, end)));
    }
    found
}

/// Walks the trie path spelled by the prefix.
fn state_of(ac: &AhoCorasick<u8>, prefix: &[u8]) -> usize {
    prefix
        .iter()
        .fold(ac.start_state(), |state, &b| ac.next_state(state, b))
}

proptest! {
    #[test]
    fn scan_finds_every_occurrence(patterns in patterns(), text in text()) {
        let ac = AhoCorasick::<u8>::new(&patterns);
        let got: Vec<_> = ac.scan(&text).map(|m| (m.pattern_id(), m.end())).collect();
        prop_assert_eq!(got, naive(&patterns, &text));
    }

    #[test]
    fn scan_chars_matches_scan_bytes_on_ascii(patterns in patterns(), text in text()) {
        let bytes: Vec<_> = AhoCorasick::<u8>::new(&patterns).scan(&text).collect();
        let chars: Vec<_> = AhoCorasick::<char>::new(&patterns).scan(&text).collect();
        prop_assert_eq!(bytes, chars);
    }

    #[test]
    fn scan_agrees_with_kmp(pattern in "[ab]{0,5}", text in "[ab]{0,40}") {
        let ac = AhoCorasick::<u8>::new([&pattern]);
        let starts: Vec<_> = ac.scan(&text).map(|m| m.start()).collect();
        prop_assert_eq!(starts, Kmp::<u8>::new(&pattern).find_all(&text));
    }

    #[test]
    fn scan_is_idempotent(patterns in patterns(), text in text()) {
        let ac = AhoCorasick::<u8>::new(&patterns);
        let a: Vec<_> = ac.scan(&text).collect();
        let b: Vec<_> = ac.scan(&text).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn transitions_are_total(patterns in patterns(), state in any::<prop::sample::Index>(), sym in any::<u8>()) {
        let ac = AhoCorasick::<u8>::new(&patterns);
        prop_assert!(ac.validate().is_ok());
        let state = state.index(ac.state_count());
        prop_assert!(ac.next_state(state, sym) < ac.state_count());
    }

    #[test]
    fn failure_is_longest_proper_suffix(patterns in patterns()) {
        let ac = AhoCorasick::<u8>::new(&patterns);
        let prefixes: BTreeSet<&[u8]> = patterns
            .iter()
            .flat_map(|p| (0..=p.len()).map(move |i| &p.as_bytes()[..i]))
            .collect();
        for prefix in &prefixes {
            let state = state_of(&ac, prefix);
            prop_assert_eq!(ac.depth(state), prefix.len());
            if prefix.is_empty() {
                prop_assert_eq!(ac.failure(state), ac.start_state());
                continue;
            }
            let suffix = (1..=prefix.len())
                .map(|i| &prefix[i..])
                .find(|s| prefixes.contains(s))
                .unwrap_or(&[][..]);
            prop_assert_eq!(ac.failure(state), state_of(&ac, suffix));
        }
    }

    #[test]
    fn outputs_are_closed_over_failure(patterns in patterns()) {
        let ac = AhoCorasick::<u8>::new(&patterns);
        for state in 0..ac.state_count() {
            let outputs: BTreeSet<_> = ac.outputs(state).collect();
            let inherited: BTreeSet<_> = ac.outputs(ac.failure(state)).collect();
            prop_assert!(inherited.is_subset(&outputs));
        }
        prop_assert_eq!(ac.outputs(ac.start_state()).count(), 0);
    }

    #[test]
    fn identical_inputs_build_identical_automatons(patterns in patterns(), text in text()) {
        let a = AhoCorasick::<u8>::new(&patterns);
        let b = AhoCorasick::<u8>::new(&patterns);
        prop_assert_eq!(a.state_count(), b.state_count());
        for state in 0..a.state_count() {
            prop_assert_eq!(a.failure(state), b.failure(state));
            for sym in text.bytes() {
                prop_assert_eq!(a.next_state(state, sym), b.next_state(state, sym));
            }
        }
    }
}
