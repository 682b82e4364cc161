use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;

use craftify_core::Clock;
use craftify_core::model::{OptionId, QuestionId, QuizDefinition, QuizReport};
use craftify_core::session::{Phase, QuizSession, TickOutcome};

use super::view::QuizSnapshot;

/// Drives one timed quiz attempt: owns the session state machine plus the
/// once-per-second countdown task running alongside user input.
///
/// The mutex serializes ticks with user actions, so no tick interleaves
/// with a partially applied action. Whichever of timeout or manual submit
/// lands first wins; the session makes the loser a no-op. Leaving
/// `InProgress` cancels the countdown task, on its own when a tick
/// expires the budget and by abort on submit or drop, so no tick can
/// touch state that has already been presented as results.
pub struct QuizRunner {
    session: Arc<Mutex<QuizSession>>,
    clock: Clock,
    ticker: Option<AbortHandle>,
}

impl QuizRunner {
    /// Starts an attempt with a live one-second countdown.
    ///
    /// Must be called within a tokio runtime.
    #[must_use]
    pub fn start(definition: QuizDefinition, clock: Clock) -> Self {
        let session = Arc::new(Mutex::new(QuizSession::new(definition, clock.now())));
        let ticker = tokio::spawn(run_countdown(Arc::clone(&session), clock));
        Self {
            session,
            clock,
            ticker: Some(ticker.abort_handle()),
        }
    }

    /// Starts an attempt whose clock is driven manually via [`Self::advance`].
    ///
    /// Used by tests and any embedding that already owns a tick source; no
    /// background task is spawned.
    #[must_use]
    pub fn start_manual(definition: QuizDefinition, clock: Clock) -> Self {
        let session = Arc::new(Mutex::new(QuizSession::new(definition, clock.now())));
        Self {
            session,
            clock,
            ticker: None,
        }
    }

    /// Delivers `seconds` countdown ticks immediately.
    ///
    /// Ticks beyond the point the session finishes are ignored by the
    /// session itself, so over-advancing is harmless.
    pub async fn advance(&self, seconds: u32) {
        let mut session = self.session.lock().await;
        for _ in 0..seconds {
            if session.tick(self.clock.now()) == TickOutcome::Ignored {
                break;
            }
        }
    }

    /// Records an answer for a question. Returns whether it was accepted.
    pub async fn select_answer(&self, question_id: &QuestionId, option_id: OptionId) -> bool {
        self.session.lock().await.select_answer(question_id, option_id)
    }

    /// Moves to the next question. Returns whether the index changed.
    pub async fn next(&self) -> bool {
        self.session.lock().await.next()
    }

    /// Moves to the previous question. Returns whether the index changed.
    pub async fn previous(&self) -> bool {
        self.session.lock().await.previous()
    }

    /// Submits the attempt and returns the frozen report.
    ///
    /// Valid at any index. If the countdown already expired the attempt,
    /// this simply returns the existing frozen report.
    pub async fn submit(&self) -> QuizReport {
        let report = {
            let mut session = self.session.lock().await;
            session.submit(self.clock.now());
            session.report()
        };
        self.cancel_ticker();
        report
    }

    /// Current view of the attempt for rendering.
    pub async fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot::from_session(&*self.session.lock().await)
    }

    /// Whether the attempt has reached its terminal phase.
    pub async fn is_finished(&self) -> bool {
        self.session.lock().await.is_finished()
    }

    /// The frozen report, or `None` while the attempt is still running.
    pub async fn report(&self) -> Option<QuizReport> {
        let session = self.session.lock().await;
        match session.phase() {
            Phase::InProgress => None,
            Phase::Results => Some(session.report()),
        }
    }

    fn cancel_ticker(&self) {
        if let Some(ticker) = &self.ticker {
            ticker.abort();
        }
    }
}

impl Drop for QuizRunner {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

async fn run_countdown(session: Arc<Mutex<QuizSession>>, clock: Clock) {
    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let mut guard = session.lock().await;
        match guard.tick(clock.now()) {
            TickOutcome::Running => {}
            TickOutcome::Expired | TickOutcome::Ignored => break,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
