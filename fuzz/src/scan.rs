#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    patterns: Vec<&'a [u8]>,
    haystack: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let Input { patterns, haystack } = input;
    let ac = acmatch::AhoCorasick::<u8>::new(patterns.iter().copied());
    ac.validate().unwrap();

    let got: Vec<_> = ac.scan(haystack).map(|m| (m.pattern_id(), m.end())).collect();

    let mut exp = Vec::new();
    for end in 0..haystack.len() {
        let mut here: Vec<_> = patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty() && haystack[..=end].ends_with(p))
            .map(|(id, p)| (p.len(), id))
            .collect();
        here.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        exp.extend(here.into_iter().map(|(_, id)| (id, end)));
    }
    assert_eq!(got, exp);
});
