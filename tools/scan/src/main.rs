//! Search files or stdin for many patterns at once.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use acmatch::{AhoCorasick, Match};

/// Search files or stdin for many patterns at once
#[derive(Debug, Parser)]
#[command(name = "acmatch-scan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// A pattern to search for, can be repeated
    #[arg(short, long = "pattern", value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Read patterns from a file, one per line
    #[arg(short = 'f', long, value_name = "FILE")]
    patterns_file: Option<PathBuf>,

    /// The file to search, stdin if missing or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Search by byte, streaming the input (default)
    #[arg(long, overrides_with = "chars")]
    bytes: bool,

    /// Search by Unicode code point instead of by byte
    #[arg(long, overrides_with = "bytes")]
    chars: bool,

    /// Print one JSON object per match instead of tab separated lines
    #[arg(long)]
    json: bool,

    /// Only print the number of matches
    #[arg(short, long)]
    count: bool,

    /// Log what the automaton is doing to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(serde::Serialize)]
struct Record<'a> {
    id: usize,
    pattern: &'a str,
    start: usize,
    end: usize,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("ACMATCH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "acmatch=debug" } else { "off" })
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("acmatch-scan: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let patterns = load_patterns(cli)?;
    if patterns.is_empty() {
        bail!("no patterns given, use --pattern or --patterns-file");
    }
    tracing::debug!(count = patterns.len(), "loaded patterns");

    let input = open_input(cli.input.as_deref())?;
    let stdout = io::stdout();
    let mut out = Output {
        cli,
        patterns: &patterns,
        writer: BufWriter::new(stdout.lock()),
        count: 0,
    };

    if cli.chars {
        scan_chars(&patterns, input, &mut out)?;
    } else {
        scan_bytes(&patterns, input, &mut out)?;
    }

    if cli.count {
        writeln!(out.writer, "{}", out.count)?;
    }
    out.writer.flush()?;
    Ok(())
}

fn load_patterns(cli: &Cli) -> Result<Vec<String>> {
    let mut patterns = cli.patterns.clone();
    if let Some(path) = &cli.patterns_file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read patterns from {}", path.display()))?;
        patterns.extend(contents.lines().map(str::to_owned));
    }
    Ok(patterns)
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(p) if p == Path::new("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Streams the input through the automaton without reading it all first.
fn scan_bytes<W: Write>(
    patterns: &[String],
    mut input: Box<dyn BufRead>,
    out: &mut Output<'_, W>,
) -> Result<()> {
    let ac = AhoCorasick::<u8>::new(patterns);
    let mut scanner = ac.scan_incremental();
    loop {
        let chunk = input.fill_buf().context("failed to read input")?;
        if chunk.is_empty() {
            break;
        }
        let n = chunk.len();
        for &byte in chunk {
            for m in scanner.feed(byte) {
                out.emit(m)?;
            }
        }
        input.consume(n);
    }
    tracing::debug!(bytes = scanner.position(), "finished scanning");
    Ok(())
}

fn scan_chars<W: Write>(
    patterns: &[String],
    mut input: Box<dyn BufRead>,
    out: &mut Output<'_, W>,
) -> Result<()> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("input is not valid UTF-8")?;
    let ac = AhoCorasick::<char>::new(patterns);
    for m in ac.scan(&text) {
        out.emit(m)?;
    }
    Ok(())
}

struct Output<'a, W> {
    cli: &'a Cli,
    patterns: &'a [String],
    writer: W,
    count: usize,
}

impl<W: Write> Output<'_, W> {
    fn emit(&mut self, m: Match) -> Result<()> {
        self.count += 1;
        if self.cli.count {
            return Ok(());
        }
        let pattern = &self.patterns[m.pattern_id()];
        if self.cli.json {
            let record = Record {
                id: m.pattern_id(),
                pattern,
                start: m.start(),
                end: m.end(),
            };
            serde_json::to_writer(&mut self.writer, &record)?;
            writeln!(self.writer)?;
        } else {
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{}",
                m.pattern_id(),
                m.start(),
                m.end(),
                pattern
            )?;
        }
        Ok(())
    }
}
