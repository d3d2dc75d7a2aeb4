//! Interactive play mode
//!
//! Text-based game loop: the player guesses, the engine scores and narrows.

use crate::engine::{GameState, Session};
use crate::history::HistoryStore;
use crate::output::display::{
    print_candidates, print_diagnostic, print_help, print_history_table, print_outcome,
    print_win_banner,
};
use crate::output::formatters::format_count;
use colored::Colorize;
use std::io::{self, Write};

/// Candidate lists longer than this are summarised instead of printed
const CANDIDATE_LIST_LIMIT: usize = 10;

/// A line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Quit,
    New,
    Undo,
    Back(usize),
    Digits(usize),
    Candidates,
    History,
    Help,
    Guess(String),
    Invalid(String),
}

impl PlayCommand {
    /// Parse a line of input; anything that is not a command is a guess
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let head = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        match (head.as_str(), arg) {
            ("quit" | "q" | "exit", None) => Self::Quit,
            ("new" | "n" | "reset", None) => Self::New,
            ("undo" | "u", None) => Self::Undo,
            ("candidates" | "c", None) => Self::Candidates,
            ("history" | "h", None) => Self::History,
            ("help" | "?", None) => Self::Help,
            ("back" | "b", Some(n)) => n
                .parse()
                .map_or_else(|_| Self::Invalid(format!("Not a turn number: {n}")), Self::Back),
            ("digits" | "d", Some(n)) => n
                .parse()
                .map_or_else(|_| Self::Invalid(format!("Not a digit count: {n}")), Self::Digits),
            _ => Self::Guess(input.to_string()),
        }
    }
}

/// Run the interactive game loop
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_play(
    session: &mut Session,
    store: &dyn HistoryStore,
    verbose: bool,
) -> Result<(), String> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Hit & Blow - Interactive                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    if verbose {
        let config = session.config();
        print_diagnostic(&format!(
            "offload {:?}, worker timeout {}s",
            config.offload,
            config.worker_timeout.as_secs()
        ));
    }

    loop {
        let prompt = match session.state() {
            GameState::Solved => "Solved! 'new' to play again".to_string(),
            _ => format!(
                "Turn {} ({} digits, {} candidates)",
                session.history().len() + 1,
                session.length(),
                session.remaining()
            ),
        };

        match PlayCommand::parse(&get_user_input(&prompt)?) {
            PlayCommand::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            PlayCommand::New => {
                session.reset();
                println!("\n🔄 New game started!\n");
            }
            PlayCommand::Undo => {
                let len = session.history().len();
                if len == 0 {
                    println!("Nothing to undo!\n");
                } else {
                    rollback(session, len - 1);
                }
            }
            PlayCommand::Back(index) => rollback(session, index),
            PlayCommand::Digits(count) => {
                session.set_length(count);
                println!(
                    "\n🔄 New {}-digit game started ({} candidates)\n",
                    session.length(),
                    session.remaining()
                );
            }
            PlayCommand::Candidates => {
                print_candidates(session.candidates(), CANDIDATE_LIST_LIMIT * 5);
            }
            PlayCommand::History => match store.list() {
                Ok(records) => print_history_table(&records),
                Err(e) => println!("{}", e.to_string().red()),
            },
            PlayCommand::Help => print_help(),
            PlayCommand::Invalid(message) => println!("{}\n", message.red()),
            PlayCommand::Guess(raw) => {
                if session.state() == GameState::Solved {
                    println!("Already solved. Type 'new' for another game.\n");
                    continue;
                }
                submit(session, store, &raw, verbose);
            }
        }
    }
}

fn submit(session: &mut Session, store: &dyn HistoryStore, raw: &str, verbose: bool) {
    let mut pending = match session.begin_guess(raw) {
        Ok(pending) => pending,
        Err(e) => {
            println!("❌ {}\n", e.user_message(session.length()).red());
            return;
        }
    };

    if !pending.is_ready() {
        println!(
            "  {} {} candidates...",
            "Narrowing".bright_black(),
            format_count(session.remaining())
        );
    }
    if verbose {
        print_diagnostic(&format!(
            "{} narrowing, {}",
            if pending.is_offloaded() { "worker" } else { "in-process" },
            pending.feedback().compact()
        ));
    }

    let outcome = match session.finish_guess(pending) {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("❌ {}\n", e.user_message(session.length()).red());
            return;
        }
    };

    print_outcome(&outcome, session.length());

    if outcome.won {
        print_win_banner(session.reveal_secret(), session.history());

        // The game stays recorded locally even if persisting fails
        if let Some(record) = session.completed_record() {
            match store.record(record) {
                Ok(stored) => {
                    if verbose {
                        print_diagnostic(&format!(
                            "saved game #{} to {} history",
                            stored.id,
                            store.backend_name()
                        ));
                    }
                }
                Err(e) => println!("{}", format!("Could not save result: {e}").yellow()),
            }
        }
    } else if outcome.remaining <= CANDIDATE_LIST_LIMIT {
        print_candidates(session.candidates(), CANDIDATE_LIST_LIMIT);
    }
}

fn rollback(session: &mut Session, index: usize) {
    match session.rollback_to(index) {
        Ok(()) if index == 0 => println!("✓ Back to the start ({} candidates)\n", session.remaining()),
        Ok(()) => println!(
            "✓ Resuming from turn {} ({} candidates)\n",
            index + 1,
            session.remaining()
        ),
        Err(e) => println!("{}\n", e.to_string().red()),
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String, String> {
    print!("{prompt}: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    // End of input behaves like quit
    if read == 0 {
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
