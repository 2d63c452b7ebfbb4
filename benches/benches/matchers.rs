//! Benchmark automaton construction and search time.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use benches::corpus;
use benches::{Acmatch, AcmatchChars, AhoCorasick, Kmp, Matcher};

criterion_main! { benches }
criterion_group! { benches, bench_build, bench_scan, bench_scan_many }

/// Benchmarks the time taken to compile a pattern set.
fn bench_build(c: &mut Criterion) {
    let mut g = c.benchmark_group("build");

    let patterns = corpus::patterns(500, 8);

    macro_rules! bench {
        ($M:ty) => {{
            g.bench_function(<$M as Matcher>::name(), |b| {
                b.iter(|| <$M as Matcher>::new(&patterns));
            });
        }};
    }

    bench!(Acmatch);
    bench!(AcmatchChars);
    bench!(AhoCorasick);
}

/// Benchmarks finding all matches of a handful of patterns.
fn bench_scan(c: &mut Criterion) {
    let mut g = c.benchmark_group("scan");

    let patterns = corpus::patterns(5, 4);
    let haystack = corpus::haystack(100_000, 4, &patterns);
    g.throughput(Throughput::Bytes(haystack.len() as u64));

    macro_rules! bench {
        ($M:ty) => {{
            g.bench_function(<$M as Matcher>::name(), |b| {
                let matcher = <$M as Matcher>::new(&patterns);
                b.iter(|| matcher.find_all(&haystack));
            });
        }};
    }

    bench!(Acmatch);
    bench!(AcmatchChars);
    bench!(AhoCorasick);
    bench!(Kmp);
}

/// Benchmarks finding all matches of a large pattern set, where a pass per
/// pattern is no longer an option.
fn bench_scan_many(c: &mut Criterion) {
    let mut g = c.benchmark_group("scan_many");

    let patterns = corpus::patterns(1_000, 16);
    let haystack = corpus::haystack(100_000, 16, &patterns);
    g.throughput(Throughput::Bytes(haystack.len() as u64));

    macro_rules! bench {
        ($M:ty) => {{
            g.bench_function(<$M as Matcher>::name(), |b| {
                let matcher = <$M as Matcher>::new(&patterns);
                b.iter(|| matcher.find_all(&haystack));
            });
        }};
    }

    bench!(Acmatch);
    bench!(AcmatchChars);
    bench!(AhoCorasick);
}
