//! Scaling probe for the diff engine.
//!
//! Generates deterministic pairs of byte sequences at increasing sizes and
//! mutation rates, runs the O(N·P) search on each, verifies the patch
//! round-trip, and reports wall-clock time and script statistics.
//!
//! Run with: `cargo run --bin diff_probe -- [--sizes 1000,10000] [--seed 7]`

use std::env;
use std::process;
use std::time::Instant;

use np_diff::DiffBuilder;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("diff_probe: {err}");
            Options::print_help();
            process::exit(2);
        }
    };

    eprintln!("np-diff scaling probe");
    eprintln!("  sizes: {:?}", options.sizes);
    eprintln!("  mutation rates: {:?}", options.rates);
    eprintln!("  seed: {}", options.seed);
    eprintln!();

    let mut failures = 0usize;
    for &len in &options.sizes {
        for &rate in &options.rates {
            let mut rng = XorShift64::new(options.seed ^ len as u64);
            let base = random_bytes(&mut rng, len);
            let mutated = mutate(&mut rng, &base, rate);

            let start = Instant::now();
            let mut diff = DiffBuilder::new(&base, &mutated)
                .huge(len >= options.huge_threshold)
                .build();
            diff.compose();
            let wall = start.elapsed();

            let ok = diff.patch(&base) == mutated;
            if !ok {
                failures += 1;
            }
            eprintln!(
                "len={len:>8} rate={rate:>5.2} distance={:>8} lcs={:>8} wall_s={:.4} round_trip={}",
                diff.edit_distance(),
                diff.lcs().len(),
                wall.as_secs_f64(),
                if ok { "ok" } else { "FAILED" }
            );
        }
    }

    if failures > 0 {
        eprintln!("\n{failures} round-trip failure(s)");
        process::exit(1);
    }
}

struct Options {
    sizes: Vec<usize>,
    rates: Vec<f64>,
    seed: u64,
    huge_threshold: usize,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut opts = Options {
            sizes: vec![1_000, 10_000, 100_000],
            rates: vec![0.01, 0.10],
            seed: 42,
            huge_threshold: 1 << 20,
        };
        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--sizes" => {
                    let v = args.next().ok_or("--sizes needs a value")?;
                    opts.sizes = v
                        .split(',')
                        .map(|s| s.trim().parse::<usize>().map_err(|e| e.to_string()))
                        .collect::<Result<_, _>>()?;
                }
                "--rates" => {
                    let v = args.next().ok_or("--rates needs a value")?;
                    opts.rates = v
                        .split(',')
                        .map(|s| s.trim().parse::<f64>().map_err(|e| e.to_string()))
                        .collect::<Result<_, _>>()?;
                }
                "--seed" => {
                    let v = args.next().ok_or("--seed needs a value")?;
                    opts.seed = v.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
                }
                "--help" | "-h" => {
                    Self::print_help();
                    process::exit(0);
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(opts)
    }

    fn print_help() {
        eprintln!("usage: diff_probe [--sizes N,N,..] [--rates R,R,..] [--seed N]");
    }
}

/// Small deterministic generator so probe runs are reproducible without
/// pulling the bench-only rand dependency into the library build.
struct XorShift64(u64);

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

fn random_bytes(rng: &mut XorShift64, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| ALPHABET[rng.next_below(ALPHABET.len())])
        .collect()
}

/// Apply point mutations (replace / insert / delete) at roughly `rate`.
fn mutate(rng: &mut XorShift64, base: &[u8], rate: f64) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    let threshold = (rate * 1_000.0) as usize;
    let mut out = Vec::with_capacity(base.len());
    for &byte in base {
        if rng.next_below(1_000) < threshold {
            match rng.next_below(3) {
                0 => out.push(ALPHABET[rng.next_below(ALPHABET.len())]), // replace
                1 => {
                    out.push(byte);
                    out.push(ALPHABET[rng.next_below(ALPHABET.len())]); // insert
                }
                _ => {} // delete
            }
        } else {
            out.push(byte);
        }
    }
    out
}
