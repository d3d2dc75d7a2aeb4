//! Background narrowing worker
//!
//! Narrowing a ten-digit universe scans 3.6 million codes, so sessions can
//! hand the job to a dedicated thread and keep the caller responsive. Each
//! job carries its own reply channel. If the worker is gone or slow, the
//! caller narrows in-process instead; the result is the same either way.

use super::filter::narrow;
use crate::core::{Code, Feedback};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Job {
    candidates: Arc<[Code]>,
    guess: Code,
    feedback: Feedback,
    reply: Sender<Vec<Code>>,
}

/// Handle to a narrowing thread
///
/// Dropping the handle closes the job queue and joins the thread.
pub struct NarrowWorker {
    jobs: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl NarrowWorker {
    /// Start the worker thread
    ///
    /// # Errors
    /// Returns an I/O error if the OS refuses to spawn the thread.
    pub fn spawn() -> io::Result<Self> {
        let (jobs, queue) = crossbeam_channel::unbounded::<Job>();

        let handle = thread::Builder::new()
            .name("hitblow-narrow".to_string())
            .spawn(move || {
                while let Ok(job) = queue.recv() {
                    let narrowed = narrow(&job.candidates, &job.guess, job.feedback);
                    // The requester may have abandoned the job; nothing to do then
                    let _ = job.reply.send(narrowed);
                }
            })?;

        Ok(Self {
            jobs: Some(jobs),
            handle: Some(handle),
        })
    }

    /// Queue a narrowing job
    ///
    /// Returns `None` if the worker thread has exited.
    pub fn dispatch(
        &self,
        candidates: Arc<[Code]>,
        guess: Code,
        feedback: Feedback,
    ) -> Option<Receiver<Vec<Code>>> {
        let (reply, result) = crossbeam_channel::bounded(1);
        let job = Job {
            candidates,
            guess,
            feedback,
            reply,
        };

        self.jobs.as_ref()?.send(job).ok().map(|()| result)
    }

    /// Check whether the worker thread is still running
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for NarrowWorker {
    fn drop(&mut self) {
        // Closing the queue ends the receive loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A narrowing that is either done or running on the worker
pub enum PendingNarrowing {
    Ready(Vec<Code>),
    InFlight {
        result: Receiver<Vec<Code>>,
        candidates: Arc<[Code]>,
        guess: Code,
        feedback: Feedback,
        timeout: Duration,
    },
}

impl PendingNarrowing {
    /// Narrow on the calling thread
    #[must_use]
    pub fn in_process(candidates: &[Code], guess: &Code, feedback: Feedback) -> Self {
        Self::Ready(narrow(candidates, guess, feedback))
    }

    /// Check whether the result can be taken without blocking
    ///
    /// A result that has arrived, or a worker that has gone away, resolves
    /// the pending value in place.
    #[must_use]
    pub fn is_ready(&mut self) -> bool {
        self.poll();
        matches!(self, Self::Ready(_))
    }

    /// Take the result if it has arrived, otherwise hand the pending value back
    ///
    /// A disconnected worker is resolved immediately by narrowing in-process.
    ///
    /// # Errors
    /// Returns `self` unchanged while the worker is still computing.
    pub fn try_take(mut self) -> Result<Vec<Code>, Self> {
        self.poll();
        match self {
            Self::Ready(codes) => Ok(codes),
            pending @ Self::InFlight { .. } => Err(pending),
        }
    }

    fn poll(&mut self) {
        let resolved = match self {
            Self::Ready(_) => return,
            Self::InFlight {
                result,
                candidates,
                guess,
                feedback,
                ..
            } => match result.try_recv() {
                Ok(codes) => codes,
                Err(TryRecvError::Disconnected) => narrow(candidates, guess, *feedback),
                Err(TryRecvError::Empty) => return,
            },
        };
        *self = Self::Ready(resolved);
    }

    /// Block until the result is available
    ///
    /// Falls back to in-process narrowing if the worker does not answer
    /// within its timeout or has gone away.
    #[must_use]
    pub fn wait(self) -> Vec<Code> {
        match self {
            Self::Ready(codes) => codes,
            Self::InFlight {
                result,
                candidates,
                guess,
                feedback,
                timeout,
            } => match result.recv_timeout(timeout) {
                Ok(codes) => codes,
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                    narrow(&candidates, &guess, feedback)
                }
            },
        }
    }

    /// Check whether the result is still owed by the worker
    #[must_use]
    pub const fn is_offloaded(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }
}
