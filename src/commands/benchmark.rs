//! Benchmark command
//!
//! Plays self-play games against random secrets, guessing a uniformly random
//! remaining candidate each turn, and measures how fast the engine narrows.

use crate::core::Code;
use crate::engine::{OffloadMode, Session, SessionConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Configuration for a benchmark run
pub struct BenchmarkConfig {
    pub digit_count: usize,
    pub games: usize,
    pub seed: u64,
    pub offload: OffloadMode,
    pub show_progress: bool,
}

impl BenchmarkConfig {
    #[must_use]
    pub const fn new(digit_count: usize, games: usize) -> Self {
        Self {
            digit_count,
            games,
            seed: 0,
            offload: OffloadMode::Auto,
            show_progress: true,
        }
    }
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub digit_count: usize,
    pub total_games: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub distribution: FxHashMap<usize, usize>,
    pub duration: Duration,
    pub narrowing_time: Duration,
    pub games_per_second: f64,
}

/// Run self-play games
///
/// # Errors
///
/// Returns an error if a game ever runs out of candidates, which would mean
/// the filter disagreed with the scoring of the secret.
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkResult, String> {
    let session_config = SessionConfig::new(config.digit_count).with_offload(config.offload);
    let mut session = Session::with_seed(session_config, config.seed);
    let mut picker = StdRng::seed_from_u64(config.seed.wrapping_add(1));

    let pb = if config.show_progress {
        ProgressBar::new(config.games as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let mut narrowing_time = Duration::ZERO;
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();

    for game in 0..config.games {
        if game > 0 {
            session.reset();
        }

        let guesses = loop {
            let guess: Code = *session.candidates().choose(&mut picker).ok_or_else(|| {
                format!(
                    "Game {}: no candidates left for secret {}",
                    game + 1,
                    session.reveal_secret()
                )
            })?;

            let narrow_start = Instant::now();
            let outcome = session
                .submit_guess(&guess.to_string())
                .map_err(|e| e.to_string())?;
            narrowing_time += narrow_start.elapsed();

            if outcome.won {
                break outcome.attempts;
            }
        };

        total_guesses += guesses;
        min_guesses = min_guesses.min(guesses);
        max_guesses = max_guesses.max(guesses);
        *distribution.entry(guesses).or_insert(0) += 1;

        pb.set_message(format!("avg {:.2}", total_guesses as f64 / (game + 1) as f64));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let duration = start.elapsed();
    let total_games = config.games;

    Ok(BenchmarkResult {
        digit_count: session.length(),
        total_games,
        total_guesses,
        average_guesses: if total_games == 0 {
            0.0
        } else {
            total_guesses as f64 / total_games as f64
        },
        min_guesses: if total_games == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        duration,
        narrowing_time,
        games_per_second: total_games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(digit_count: usize, games: usize) -> BenchmarkConfig {
        BenchmarkConfig {
            show_progress: false,
            offload: OffloadMode::Never,
            ..BenchmarkConfig::new(digit_count, games)
        }
    }

    #[test]
    fn benchmark_runs() {
        let result = run_benchmark(&quiet(4, 10)).unwrap();

        assert_eq!(result.total_games, 10);
        assert_eq!(result.digit_count, 4);
        assert!(result.min_guesses >= 1);
        assert!(result.average_guesses >= result.min_guesses as f64);
        assert!(result.average_guesses <= result.max_guesses as f64);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let result = run_benchmark(&quiet(3, 20)).unwrap();
        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum, result.total_games);
    }

    #[test]
    fn benchmark_is_reproducible_from_seed() {
        let a = run_benchmark(&quiet(4, 5)).unwrap();
        let b = run_benchmark(&quiet(4, 5)).unwrap();
        assert_eq!(a.total_guesses, b.total_guesses);
        assert_eq!(a.distribution, b.distribution);
    }

    #[test]
    fn benchmark_single_digit_worst_case() {
        // One digit: at most ten guesses, since each miss removes exactly one candidate
        let result = run_benchmark(&quiet(1, 30)).unwrap();
        assert!(result.max_guesses <= 10);
    }

    #[test]
    fn benchmark_empty_run() {
        let result = run_benchmark(&quiet(4, 0)).unwrap();
        assert_eq!(result.total_games, 0);
        assert_eq!(result.total_guesses, 0);
        assert_eq!(result.min_guesses, 0);
    }
}
