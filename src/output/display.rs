//! Display functions for command results

use super::formatters::{
    create_progress_bar, feedback_pegs, format_age, format_count, format_elapsed,
};
use crate::commands::{BenchmarkResult, ReplayResult, UniverseRow};
use crate::core::{Code, Turn};
use crate::engine::GuessOutcome;
use crate::history::GameRecord;
use colored::Colorize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Print the feedback for one accepted guess
pub fn print_outcome(outcome: &GuessOutcome, length: usize) {
    println!(
        "  {} {}  {}",
        outcome.turn.guess.to_string().bright_white().bold(),
        feedback_pegs(outcome.turn.feedback, length).bright_yellow(),
        outcome.turn.feedback
    );
    if !outcome.won {
        println!(
            "  {} candidates remaining\n",
            format_count(outcome.remaining).cyan()
        );
    }
}

/// Print the end-of-game banner with the full guess history
pub fn print_win_banner(secret: Code, history: &[Turn]) {
    let attempts = history.len();

    println!("\n{}", "═".repeat(70).bright_cyan());
    println!(
        "{}",
        format!("    🎉  Correct! The secret number was {secret}  🎉    ")
            .bright_green()
            .bold()
    );
    println!("{}", "═".repeat(70).bright_cyan());

    println!(
        "\n  Solved in {} {}",
        attempts.to_string().bright_cyan().bold(),
        if attempts == 1 { "guess" } else { "guesses" }
    );

    println!("\n  Guess history:");
    for (i, turn) in history.iter().enumerate() {
        println!(
            "    {}. {} {} {}",
            (i + 1).to_string().bright_black(),
            turn.guess.to_string().bright_white().bold(),
            feedback_pegs(turn.feedback, secret.len()),
            turn.feedback.compact().bright_black()
        );
    }
    println!("\n{}\n", "═".repeat(70).bright_cyan());
}

/// Print up to `limit` candidates
pub fn print_candidates(codes: &[Code], limit: usize) {
    if codes.is_empty() {
        println!("{}\n", "No candidates remain.".red());
        return;
    }

    println!("Remaining candidates:");
    for code in codes.iter().take(limit) {
        println!("  • {code}");
    }
    if codes.len() > limit {
        println!(
            "  {}",
            format!("… and {} more", format_count(codes.len() - limit)).bright_black()
        );
    }
    println!();
}

/// Print the play-mode command summary
pub fn print_help() {
    println!("Guess the secret number: every digit is different.");
    println!("After each guess you get Hits (right digit, right place)");
    println!("and Blows (right digit, wrong place).\n");
    println!("Commands: 'new', 'undo', 'back <turn>', 'digits <n>', 'candidates',");
    println!("          'history', 'help', 'quit'\n");
}

/// Print completed games, newest first
pub fn print_history_table(records: &[GameRecord]) {
    if records.is_empty() {
        println!("No completed games yet.\n");
        return;
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    println!(
        "\n  {:>4}  {:>6}  {:>8}  {:>9}  {}",
        "#".bright_black(),
        "digits".bright_black(),
        "attempts".bright_black(),
        "time".bright_black(),
        "played".bright_black()
    );
    for record in records {
        println!(
            "  {:>4}  {:>6}  {:>8}  {:>9}  {}",
            record.id,
            record.digit_count,
            record.attempts.to_string().bright_yellow(),
            format_elapsed(record.elapsed_ms),
            format_age(record.played_at, now)
        );
    }
    println!();
}

/// Print a diagnostic line on stderr
pub fn print_diagnostic(message: &str) {
    eprintln!("{}", format!("[diag] {message}").dimmed());
}

/// Print the result of a replay
pub fn print_replay_result(result: &ReplayResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Replaying against: {}",
        result.secret.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        println!(
            "\nTurn {}: {} {}  {}",
            i + 1,
            step.guess,
            feedback_pegs(step.feedback, result.secret.len()),
            step.feedback.compact().bright_yellow()
        );
        println!(
            "  Candidates: {} → {}",
            format_count(step.candidates_before),
            format_count(step.candidates_after)
        );
    }

    println!();
    if result.solved {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.steps.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Not solved after {} guesses", result.steps.len())
                .red()
                .bold()
        );
    }
}

/// Print universe sizes
pub fn print_universe_rows(rows: &[UniverseRow]) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "CANDIDATE UNIVERSE".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    for row in rows {
        print!(
            "   {:>2} digits: {:>11}",
            row.length,
            format_count(row.size).bright_yellow()
        );
        if let Some((first, last)) = row.bounds {
            print!("   ({first} … {last})");
        }
        println!();
    }
    println!();
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Digits:           {}", result.digit_count);
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!(
        "   Narrowing time:   {:.2}s",
        result.narrowing_time.as_secs_f64()
    );
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.total_games == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for guess_count in result.min_guesses..=result.max_guesses {
        if let Some(&count) = result.distribution.get(&guess_count) {
            let pct = (count as f64 / result.total_games as f64) * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {guess_count:>2}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }
}
