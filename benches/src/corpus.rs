use rand::seq::SliceRandom;
use rand::Rng;

/// Returns `n` random words made of the first `k` lowercase letters.
pub fn patterns(n: usize, k: u8) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            let len = rng.gen_range(3..12);
            word(&mut rng, len, k)
        })
        .collect()
}

/// Returns a haystack of `len` random letters with the patterns planted in it.
pub fn haystack(len: usize, k: u8, patterns: &[String]) -> String {
    let mut rng = rand::thread_rng();
    let mut text = String::with_capacity(len + 16);
    while text.len() < len {
        if rng.gen_ratio(1, 8) {
            if let Some(p) = patterns.choose(&mut rng) {
                text.push_str(p);
                continue;
            }
        }
        text.push(letter(&mut rng, k));
    }
    text
}

fn word<R: Rng>(rng: &mut R, len: usize, k: u8) -> String {
    (0..len).map(|_| letter(rng, k)).collect()
}

fn letter<R: Rng>(rng: &mut R, k: u8) -> char {
    (b'a' + rng.gen_range(0..k)) as char
}
