//! Game session: secret, history and candidate snapshots
//!
//! A session moves through `Idle -> InProgress -> Solved`. Every accepted
//! guess narrows the current candidate set by that guess alone and records
//! the result, so the candidate history always has one more entry than the
//! guess history and rollback is a truncation.

use super::universe::universe_for;
use super::worker::{NarrowWorker, PendingNarrowing};
use super::{GameError, SessionConfig};
use crate::core::{Code, Feedback, Turn};
use crate::history::NewRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Where the session is in its game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No guesses yet; candidates are the full universe
    Idle,
    /// At least one guess, not solved
    InProgress,
    /// A guess matched the secret exactly
    Solved,
}

/// Result of an accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub turn: Turn,
    /// Candidates left after this guess
    pub remaining: usize,
    /// Number of guesses made so far, including this one
    pub attempts: usize,
    pub won: bool,
}

/// A scored guess whose narrowing may still be running
///
/// Hand it back to `Session::finish_guess` to apply it.
pub struct PendingGuess {
    session_id: u64,
    epoch: u64,
    turn: Turn,
    narrowing: PendingNarrowing,
    offloaded: bool,
}

impl PendingGuess {
    #[must_use]
    pub const fn turn(&self) -> Turn {
        self.turn
    }

    #[must_use]
    pub const fn feedback(&self) -> Feedback {
        self.turn.feedback
    }

    /// Check whether finishing would not block
    #[must_use]
    pub fn is_ready(&mut self) -> bool {
        self.narrowing.is_ready()
    }

    /// Whether the narrowing was handed to the background worker
    #[must_use]
    pub const fn is_offloaded(&self) -> bool {
        self.offloaded
    }
}

/// One player's game
pub struct Session {
    id: u64,
    config: SessionConfig,
    secret: Code,
    history: Vec<Turn>,
    snapshots: Vec<Arc<[Code]>>,
    epoch: u64,
    stale_discards: usize,
    started: Instant,
    rng: StdRng,
    worker: Option<NarrowWorker>,
    worker_unavailable: bool,
}

impl Session {
    /// Start a session with an OS-seeded secret
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Start a session whose secrets are reproducible from `seed`
    #[must_use]
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Start a session with a fixed secret
    ///
    /// The digit count is taken from the secret; later resets draw random
    /// secrets of that length.
    #[must_use]
    pub fn with_secret(config: SessionConfig, secret: Code) -> Self {
        let mut config = config;
        config.digit_count = super::DigitCount::clamped(secret.len());

        let mut session = Self::new(config);
        session.secret = secret;
        session
    }

    fn with_rng(config: SessionConfig, mut rng: StdRng) -> Self {
        let secret = generate_secret(config.length(), &mut rng);
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            config,
            secret,
            history: Vec::new(),
            snapshots: vec![universe_for(config.digit_count)],
            epoch: 0,
            stale_discards: 0,
            started: Instant::now(),
            rng,
            worker: None,
            worker_unavailable: false,
        }
    }

    /// Change the digit count (clamped into 1-10) and start over
    pub fn set_length(&mut self, length: usize) {
        self.config.digit_count = super::DigitCount::clamped(length);
        self.reset();
    }

    /// Start a new game with a fresh secret of the current length
    pub fn reset(&mut self) {
        self.secret = generate_secret(self.length(), &mut self.rng);
        self.history.clear();
        self.snapshots.clear();
        self.snapshots.push(universe_for(self.config.digit_count));
        self.started = Instant::now();
        self.epoch += 1;
    }

    /// Score a guess and apply it
    ///
    /// # Errors
    /// Returns `GameError::Validation` if `raw` is not exactly `length`
    /// distinct digits. The session is unchanged in that case.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GameError> {
        let pending = self.begin_guess(raw)?;
        self.finish_guess(pending)
    }

    /// Score a guess and start narrowing without applying it yet
    ///
    /// Any earlier pending guess becomes stale.
    ///
    /// # Errors
    /// Returns `GameError::Validation` if `raw` is not exactly `length`
    /// distinct digits.
    pub fn begin_guess(&mut self, raw: &str) -> Result<PendingGuess, GameError> {
        let guess = Code::parse(raw, self.length())?;
        let feedback = Feedback::score(&guess, &self.secret);

        self.epoch += 1;
        let narrowing = self.dispatch(guess, feedback);

        Ok(PendingGuess {
            session_id: self.id,
            epoch: self.epoch,
            turn: Turn::new(guess, feedback),
            offloaded: narrowing.is_offloaded(),
            narrowing,
        })
    }

    /// Apply a pending guess
    ///
    /// # Errors
    /// Returns `GameError::StaleComputation` if the session was reset, rolled
    /// back or given another guess since `begin_guess`. The late result is
    /// dropped and the session is unchanged.
    pub fn finish_guess(&mut self, pending: PendingGuess) -> Result<GuessOutcome, GameError> {
        if pending.session_id != self.id || pending.epoch != self.epoch {
            self.stale_discards += 1;
            return Err(GameError::StaleComputation);
        }

        let narrowed = pending.narrowing.wait();
        let remaining = narrowed.len();
        self.history.push(pending.turn);
        self.snapshots.push(narrowed.into());

        Ok(GuessOutcome {
            turn: pending.turn,
            remaining,
            attempts: self.history.len(),
            won: pending.turn.feedback.is_win(self.length()),
        })
    }

    /// Return to the state after the first `index` guesses
    ///
    /// The secret is kept; `rollback_to(0)` restores the full universe.
    ///
    /// # Errors
    /// Returns `GameError::RollbackOutOfRange` if `index` exceeds the number
    /// of guesses made.
    pub fn rollback_to(&mut self, index: usize) -> Result<(), GameError> {
        if index > self.history.len() {
            return Err(GameError::RollbackOutOfRange {
                index,
                len: self.history.len(),
            });
        }

        self.history.truncate(index);
        self.snapshots.truncate(index + 1);
        self.epoch += 1;
        Ok(())
    }

    fn dispatch(&mut self, guess: Code, feedback: Feedback) -> PendingNarrowing {
        let current = Arc::clone(self.current_snapshot());
        let timeout = self.config.worker_timeout;

        if self.config.uses_worker()
            && let Some(worker) = self.worker()
            && let Some(result) = worker.dispatch(Arc::clone(&current), guess, feedback)
        {
            return PendingNarrowing::InFlight {
                result,
                candidates: current,
                guess,
                feedback,
                timeout,
            };
        }

        PendingNarrowing::in_process(&current, &guess, feedback)
    }

    /// Lazily start the worker; a failed or dead worker is not retried
    fn worker(&mut self) -> Option<&NarrowWorker> {
        if self.worker_unavailable {
            return None;
        }

        if self.worker.as_ref().is_some_and(|w| !w.is_alive()) {
            self.worker = None;
            self.worker_unavailable = true;
            return None;
        }

        if self.worker.is_none() {
            match NarrowWorker::spawn() {
                Ok(worker) => self.worker = Some(worker),
                Err(_) => {
                    self.worker_unavailable = true;
                    return None;
                }
            }
        }

        self.worker.as_ref()
    }

    fn current_snapshot(&self) -> &Arc<[Code]> {
        // Never empty: constructors and reset seed the universe, rollback keeps index 0
        &self.snapshots[self.snapshots.len() - 1]
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.config.length()
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        if self.history.is_empty() {
            GameState::Idle
        } else if self.solved_at().is_some() {
            GameState::Solved
        } else {
            GameState::InProgress
        }
    }

    /// Number of guesses up to and including the first exact match
    fn solved_at(&self) -> Option<usize> {
        let length = self.length();
        self.history
            .iter()
            .position(|turn| turn.feedback.is_win(length))
            .map(|i| i + 1)
    }

    #[must_use]
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Current candidate set
    #[must_use]
    pub fn candidates(&self) -> &[Code] {
        self.current_snapshot()
    }

    /// Candidate set after the first `index` guesses
    #[must_use]
    pub fn candidates_at(&self, index: usize) -> Option<&[Code]> {
        self.snapshots.get(index).map(|s| &s[..])
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.current_snapshot().len()
    }

    /// Number of stored snapshots (always `history().len() + 1`)
    #[must_use]
    pub fn candidate_history_len(&self) -> usize {
        self.snapshots.len()
    }

    /// Pending results discarded because the session had moved on
    #[must_use]
    pub const fn stale_discards(&self) -> usize {
        self.stale_discards
    }

    /// Time since the current game started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// The secret, for end-of-game display and tests
    #[must_use]
    pub const fn reveal_secret(&self) -> Code {
        self.secret
    }

    /// Record to persist once the game is solved
    #[must_use]
    pub fn completed_record(&self) -> Option<NewRecord> {
        self.solved_at().map(|attempts| NewRecord {
            digit_count: self.length(),
            attempts,
            elapsed_ms: u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }
}

/// Draw `length` distinct digits uniformly without replacement
fn generate_secret(length: usize, rng: &mut StdRng) -> Code {
    let mut digits: Vec<u8> = (0..10).collect();
    digits.shuffle(rng);
    digits.truncate(length);
    Code::from_digits(&digits).unwrap_or(Code::EMPTY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{OffloadMode, filter_by_feedback, universe};

    fn code(s: &str) -> Code {
        s.parse().unwrap()
    }

    fn fixed(secret: &str) -> Session {
        Session::with_secret(SessionConfig::default(), code(secret))
    }

    #[test]
    fn new_session_is_idle_with_full_universe() {
        let session = Session::with_seed(SessionConfig::default(), 7);
        assert_eq!(session.state(), GameState::Idle);
        assert_eq!(session.remaining(), 5040);
        assert_eq!(session.candidate_history_len(), 1);
        assert_eq!(session.reveal_secret().len(), 4);
        assert_eq!(session.reveal_secret().mask().count_ones(), 4);
    }

    #[test]
    fn seeded_sessions_draw_same_secret() {
        let a = Session::with_seed(SessionConfig::new(6), 42);
        let b = Session::with_seed(SessionConfig::new(6), 42);
        assert_eq!(a.reveal_secret(), b.reveal_secret());
    }

    #[test]
    fn submit_guess_scores_against_secret() {
        let mut session = fixed("1234");

        let outcome = session.submit_guess("4321").unwrap();
        assert_eq!(outcome.turn.feedback, Feedback::new(0, 4));
        assert!(!outcome.won);
        assert_eq!(session.state(), GameState::InProgress);

        let outcome = session.submit_guess("1234").unwrap();
        assert_eq!(outcome.turn.feedback, Feedback::new(4, 0));
        assert!(outcome.won);
        assert_eq!(outcome.remaining, 1);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(session.state(), GameState::Solved);
    }

    #[test]
    fn invalid_guess_leaves_state_untouched() {
        let mut session = fixed("1234");
        session.submit_guess("5678").unwrap();
        let before = session.remaining();

        for bad in ["1123", "123", "12345", "ab!@", ""] {
            let err = session.submit_guess(bad).unwrap_err();
            assert!(matches!(err, GameError::Validation(_)), "{bad}");
        }

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.remaining(), before);
        assert_eq!(session.candidate_history_len(), 2);
    }

    #[test]
    fn candidates_narrow_monotonically_and_keep_secret() {
        let mut session = fixed("7380");
        let mut previous = session.remaining();

        for guess in ["0123", "4567", "8901", "3807", "7380"] {
            let outcome = session.submit_guess(guess).unwrap();
            assert!(outcome.remaining <= previous);
            assert!(session.candidates().contains(&code("7380")));
            previous = outcome.remaining;
        }
        assert_eq!(session.candidates(), &[code("7380")]);
    }

    #[test]
    fn snapshots_match_full_recompute() {
        let mut session = fixed("2468");
        for guess in ["1357", "2345", "6824"] {
            session.submit_guess(guess).unwrap();
        }

        let all = universe(4).unwrap();
        for k in 0..=session.history().len() {
            assert_eq!(
                session.candidates_at(k).unwrap(),
                filter_by_feedback(&all, &session.history()[..k]).as_slice()
            );
        }
    }

    #[test]
    fn rollback_truncates_and_keeps_secret() {
        let mut session = fixed("1234");
        session.submit_guess("5678").unwrap();
        let after_first = session.candidates().to_vec();
        session.submit_guess("1243").unwrap();
        session.submit_guess("1234").unwrap();

        session.rollback_to(1).unwrap();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.candidate_history_len(), 2);
        assert_eq!(session.candidates(), after_first.as_slice());
        assert_eq!(session.state(), GameState::InProgress);

        session.rollback_to(0).unwrap();
        assert_eq!(session.state(), GameState::Idle);
        assert_eq!(session.remaining(), 5040);
        assert_eq!(session.reveal_secret(), code("1234"));
    }

    #[test]
    fn rollback_to_current_length_is_noop() {
        let mut session = fixed("1234");
        session.submit_guess("5678").unwrap();
        session.rollback_to(1).unwrap();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn rollback_out_of_range_is_rejected() {
        let mut session = fixed("1234");
        session.submit_guess("5678").unwrap();
        assert_eq!(
            session.rollback_to(2),
            Err(GameError::RollbackOutOfRange { index: 2, len: 1 })
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn rollback_then_replay_reproduces_snapshots() {
        let mut session = fixed("9051");
        let guesses = ["1234", "5678", "9012", "9051"];
        for g in guesses {
            session.submit_guess(g).unwrap();
        }
        let original: Vec<Vec<Code>> = (0..=guesses.len())
            .map(|k| session.candidates_at(k).unwrap().to_vec())
            .collect();

        session.rollback_to(1).unwrap();
        for g in &guesses[1..] {
            session.submit_guess(g).unwrap();
        }

        for (k, snapshot) in original.iter().enumerate() {
            assert_eq!(session.candidates_at(k).unwrap(), snapshot.as_slice());
        }
    }

    #[test]
    fn reset_clears_history_and_keeps_length() {
        let mut session = fixed("1234");
        session.submit_guess("1234").unwrap();
        session.reset();
        assert_eq!(session.state(), GameState::Idle);
        assert!(session.history().is_empty());
        assert_eq!(session.candidate_history_len(), 1);
        assert_eq!(session.length(), 4);
    }

    #[test]
    fn set_length_clamps_and_resets() {
        let mut session = fixed("1234");
        session.submit_guess("5678").unwrap();

        session.set_length(3);
        assert_eq!(session.length(), 3);
        assert_eq!(session.remaining(), 720);
        assert!(session.history().is_empty());
        assert_eq!(session.reveal_secret().len(), 3);

        session.set_length(0);
        assert_eq!(session.length(), 1);
        assert_eq!(session.remaining(), 10);

        session.set_length(99);
        assert_eq!(session.length(), 10);
    }

    #[test]
    fn stale_pending_guess_is_discarded_after_reset() {
        let mut session = fixed("1234");
        let pending = session.begin_guess("5678").unwrap();
        session.reset();

        assert_eq!(
            session.finish_guess(pending),
            Err(GameError::StaleComputation)
        );
        assert!(session.history().is_empty());
        assert_eq!(session.stale_discards(), 1);
    }

    #[test]
    fn older_pending_guess_is_discarded_after_newer_one() {
        let mut session = fixed("1234");
        let first = session.begin_guess("5678").unwrap();
        let second = session.begin_guess("1243").unwrap();

        assert_eq!(
            session.finish_guess(first),
            Err(GameError::StaleComputation)
        );
        let outcome = session.finish_guess(second).unwrap();
        assert_eq!(outcome.turn.feedback, Feedback::new(2, 2));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn pending_guess_from_another_session_is_stale() {
        let mut a = fixed("1234");
        let mut b = fixed("1234");
        let pending = a.begin_guess("5678").unwrap();
        assert_eq!(b.finish_guess(pending), Err(GameError::StaleComputation));
    }

    #[test]
    fn worker_and_in_process_agree() {
        let guesses = ["0123", "4567", "1032"];
        let secret = code("1023");

        let mut offloaded = Session::with_secret(
            SessionConfig::default().with_offload(OffloadMode::Always),
            secret,
        );
        let mut local = Session::with_secret(
            SessionConfig::default().with_offload(OffloadMode::Never),
            secret,
        );

        for g in guesses {
            let pending = offloaded.begin_guess(g).unwrap();
            assert!(pending.is_offloaded());
            let a = offloaded.finish_guess(pending).unwrap();
            let b = local.submit_guess(g).unwrap();
            assert_eq!(a, b);
            assert_eq!(offloaded.candidates(), local.candidates());
        }
    }

    #[test]
    fn pending_guess_readiness() {
        let secret = code("1234");
        let mut local = Session::with_secret(
            SessionConfig::default().with_offload(OffloadMode::Never),
            secret,
        );
        let mut pending = local.begin_guess("5678").unwrap();
        assert!(pending.is_ready());
        assert!(!pending.is_offloaded());
        assert_eq!(local.finish_guess(pending).unwrap().remaining, 360);

        let mut offloaded = Session::with_secret(
            SessionConfig::default().with_offload(OffloadMode::Always),
            secret,
        );
        let mut pending = offloaded.begin_guess("5678").unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        while !pending.is_ready() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(pending.is_ready());
        assert!(pending.is_offloaded());
        assert_eq!(offloaded.finish_guess(pending).unwrap().remaining, 360);
    }

    #[test]
    fn completed_record_only_when_solved() {
        let mut session = fixed("1234");
        assert!(session.completed_record().is_none());

        session.submit_guess("4321").unwrap();
        session.submit_guess("1234").unwrap();

        let record = session.completed_record().unwrap();
        assert_eq!(record.digit_count, 4);
        assert_eq!(record.attempts, 2);
    }

    #[test]
    fn single_digit_game_is_always_winnable() {
        let secret = Code::from_digits(&[7]).unwrap();
        let mut session = Session::with_secret(SessionConfig::new(1), secret);

        let mut won = false;
        for digit in 0..10 {
            let outcome = session.submit_guess(&digit.to_string()).unwrap();
            assert!(session.candidates().contains(&secret));
            if outcome.won {
                won = true;
                break;
            }
        }

        assert!(won);
        assert_eq!(session.history().len(), 8);
        assert_eq!(session.candidates(), &[secret]);
    }

    #[test]
    fn generated_secrets_have_distinct_digits() {
        let mut rng = StdRng::seed_from_u64(3);
        for length in 1..=10 {
            let secret = generate_secret(length, &mut rng);
            assert_eq!(secret.len(), length);
            assert_eq!(secret.mask().count_ones() as usize, length);
        }
    }
}
