#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &[u8])| {
    let (json, haystack) = data;
    // anything that deserializes must be safe to scan with
    if let Ok(ac) = serde_json::from_str::<acmatch::AhoCorasick<u8>>(json) {
        for m in ac.scan(haystack) {
            let range = m.range();
            assert!(range.end <= haystack.len());
            assert_eq!(range.len(), m.len());
        }
    }
});
