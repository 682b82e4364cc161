use chrono::{DateTime, Utc};

use crate::model::{AnswerLedger, OptionId, Question, QuestionId, QuizDefinition, QuizReport};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz attempt. `Results` is terminal: once reached, the
/// ledger, position, and remaining time are frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Results,
}

/// Outcome of delivering one countdown tick to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time remains and the session is still running.
    Running,
    /// This tick exhausted the budget and auto-submitted the attempt.
    Expired,
    /// The session had already left `InProgress`; nothing changed.
    Ignored,
}

//
// ─── NAVIGATOR ─────────────────────────────────────────────────────────────────
//

/// Bounded cursor over the ordered question list.
///
/// Movement is single-step only; both bounds are silent no-ops so the
/// caller can offer "submit" instead of "next" on the last question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    count: usize,
}

impl Navigator {
    /// `count` must be >= 1; a validated definition guarantees this.
    #[must_use]
    pub(crate) fn new(count: usize) -> Self {
        debug_assert!(count >= 1);
        Self { index: 0, count }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Moves forward one question. Returns false at the last index.
    pub(crate) fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Moves back one question. Returns false at index zero.
    pub(crate) fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// State machine for one timed quiz attempt.
///
/// Composes the definition, answer ledger, navigator, and countdown into
/// two externally visible phases. Ticks are delivered by the caller (a
/// scheduled timer in production, a loop in tests), so no wall-clock time
/// is needed to exercise any transition.
///
/// Every mutating operation is a silent no-op once the phase is
/// `Results`; the UI is expected to prevent those calls, and the boolean
/// returns let callers observe the rejection without an error channel.
#[derive(Debug, Clone)]
pub struct QuizSession {
    definition: QuizDefinition,
    ledger: AnswerLedger,
    navigator: Navigator,
    phase: Phase,
    remaining_seconds: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Starts an attempt against a validated definition with the full
    /// time budget on the clock.
    ///
    /// `started_at` should come from the services layer clock to keep
    /// time deterministic.
    #[must_use]
    pub fn new(definition: QuizDefinition, started_at: DateTime<Utc>) -> Self {
        let navigator = Navigator::new(definition.question_count());
        let remaining_seconds = definition.time_limit_seconds();
        Self {
            definition,
            ledger: AnswerLedger::new(),
            navigator,
            phase: Phase::InProgress,
            remaining_seconds,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Results
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn ledger(&self) -> &AnswerLedger {
        &self.ledger
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigator.index()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.definition.questions()[self.navigator.index()]
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Records an answer for a question, overwriting any prior choice.
    ///
    /// Ignored once the session has finished, and ignored when the
    /// question is unknown or the option does not belong to it; the
    /// ledger only ever holds ids the definition can resolve. Returns
    /// whether the selection was recorded.
    pub fn select_answer(&mut self, question_id: &QuestionId, option_id: OptionId) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let Some(question) = self.definition.question(question_id) else {
            return false;
        };
        if question.option(&option_id).is_none() {
            return false;
        }
        self.ledger.select(question_id.clone(), option_id);
        true
    }

    /// Advances to the next question. No-op at the last index and after
    /// the session has finished.
    pub fn next(&mut self) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        self.navigator.next()
    }

    /// Steps back to the previous question. No-op at index zero and
    /// after the session has finished.
    pub fn previous(&mut self) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        self.navigator.previous()
    }

    /// Submits the attempt, freezing the ledger and remaining time.
    ///
    /// Accepted at any index; submitting early freezes whatever state
    /// exists. Idempotent: a concurrent timeout and manual submit race
    /// resolves to whichever lands first, the other is a no-op.
    pub fn submit(&mut self, at: DateTime<Utc>) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        self.finish(at);
        true
    }

    /// Delivers one countdown tick.
    ///
    /// Decrements the remaining time by one second; reaching zero
    /// auto-submits unconditionally, even mid-interaction. Ticks arriving
    /// after the phase flipped never mutate anything (idempotent floor),
    /// so a late tick from a cancelled timer is harmless.
    pub fn tick(&mut self, at: DateTime<Utc>) -> TickOutcome {
        if self.phase != Phase::InProgress {
            return TickOutcome::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.finish(at);
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Scores the attempt from the current ledger.
    ///
    /// Pure over the frozen state: after the session finishes, repeated
    /// calls always produce the same report.
    #[must_use]
    pub fn report(&self) -> QuizReport {
        QuizReport::score(&self.definition, &self.ledger)
    }

    fn finish(&mut self, at: DateTime<Utc>) {
        self.phase = Phase::Results;
        self.completed_at = Some(at);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizOption;
    use crate::time::fixed_now;

    fn question(id: &str, correct: &str, points: u32) -> Question {
        Question {
            id: QuestionId::new(id),
            prompt: format!("Prompt {id}"),
            options: vec![QuizOption::new("x", "Ex"), QuizOption::new("y", "Why")],
            correct_option_id: OptionId::new(correct),
            points,
        }
    }

    fn two_question_session(time_limit: u32) -> QuizSession {
        let quiz = QuizDefinition::new(
            "Timed",
            time_limit,
            vec![question("a", "x", 5), question("b", "y", 5)],
        )
        .unwrap();
        QuizSession::new(quiz, fixed_now())
    }

    #[test]
    fn starts_with_full_budget_at_first_question() {
        let session = two_question_session(120);
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.remaining_seconds(), 120);
        assert_eq!(session.current_index(), 0);
        assert!(session.ledger().is_empty());
        assert_eq!(session.started_at(), fixed_now());
        assert!(session.completed_at().is_none());
    }

    #[test]
    fn navigation_is_bounded_single_step() {
        let mut session = two_question_session(120);

        assert!(!session.previous());
        assert_eq!(session.current_index(), 0);

        assert!(session.next());
        assert_eq!(session.current_index(), 1);
        assert!(session.navigator().is_last());

        assert!(!session.next());
        assert_eq!(session.current_index(), 1);

        assert!(session.previous());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn select_answer_rejects_foreign_ids() {
        let mut session = two_question_session(120);

        assert!(!session.select_answer(&QuestionId::new("nope"), OptionId::new("x")));
        assert!(!session.select_answer(&QuestionId::new("a"), OptionId::new("zz")));
        assert!(session.ledger().is_empty());

        assert!(session.select_answer(&QuestionId::new("a"), OptionId::new("x")));
        assert_eq!(session.ledger().answered_count(), 1);
    }

    #[test]
    fn revising_an_answer_only_touches_that_entry() {
        let mut session = two_question_session(120);
        session.select_answer(&QuestionId::new("a"), OptionId::new("x"));
        session.select_answer(&QuestionId::new("b"), OptionId::new("y"));

        session.select_answer(&QuestionId::new("a"), OptionId::new("y"));

        assert_eq!(
            session.ledger().selected(&QuestionId::new("b")),
            Some(&OptionId::new("y"))
        );
    }

    #[test]
    fn tick_counts_down_and_expires_at_zero() {
        let mut session = two_question_session(2);
        assert_eq!(session.tick(fixed_now()), TickOutcome::Running);
        assert_eq!(session.remaining_seconds(), 1);

        assert_eq!(session.tick(fixed_now()), TickOutcome::Expired);
        assert_eq!(session.remaining_seconds(), 0);
        assert_eq!(session.phase(), Phase::Results);
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn late_ticks_never_go_negative_or_mutate() {
        let mut session = two_question_session(1);
        assert_eq!(session.tick(fixed_now()), TickOutcome::Expired);

        for _ in 0..5 {
            assert_eq!(session.tick(fixed_now()), TickOutcome::Ignored);
        }
        assert_eq!(session.remaining_seconds(), 0);
    }

    #[test]
    fn timeout_auto_submits_with_partial_answers() {
        let mut session = two_question_session(1);
        session.select_answer(&QuestionId::new("a"), OptionId::new("x"));

        assert_eq!(session.tick(fixed_now()), TickOutcome::Expired);

        let report = session.report();
        assert_eq!(report.total_score(), 5);
        assert_eq!(report.max_score(), 10);
        assert!((report.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn early_submit_freezes_empty_ledger() {
        let mut session = two_question_session(60);
        assert_eq!(session.current_index(), 0);

        assert!(session.submit(fixed_now()));
        assert_eq!(session.phase(), Phase::Results);

        let report = session.report();
        assert_eq!(report.total_score(), 0);
        assert_eq!(report.max_score(), 10);
    }

    #[test]
    fn submit_freezes_remaining_time() {
        let mut session = two_question_session(60);
        session.tick(fixed_now());
        session.tick(fixed_now());
        assert_eq!(session.remaining_seconds(), 58);

        session.submit(fixed_now());

        assert_eq!(session.remaining_seconds(), 58);
        assert_eq!(session.tick(fixed_now()), TickOutcome::Ignored);
        assert_eq!(session.remaining_seconds(), 58);
    }

    #[test]
    fn results_phase_is_terminal_and_frozen() {
        let mut session = two_question_session(60);
        session.select_answer(&QuestionId::new("a"), OptionId::new("x"));
        session.next();
        session.submit(fixed_now());

        let ledger_before = session.ledger().clone();
        let index_before = session.current_index();

        assert!(!session.submit(fixed_now()));
        assert!(!session.select_answer(&QuestionId::new("b"), OptionId::new("y")));
        assert!(!session.next());
        assert!(!session.previous());
        assert_eq!(session.tick(fixed_now()), TickOutcome::Ignored);

        assert_eq!(session.ledger(), &ledger_before);
        assert_eq!(session.current_index(), index_before);
        assert_eq!(session.phase(), Phase::Results);
    }

    #[test]
    fn report_is_reproducible_after_freeze() {
        let mut session = two_question_session(60);
        session.select_answer(&QuestionId::new("a"), OptionId::new("y"));
        session.submit(fixed_now());

        let first = session.report();
        let second = session.report();
        assert_eq!(first, second);
    }

    #[test]
    fn single_question_session_offers_submit_not_next() {
        let quiz = QuizDefinition::new("One", 60, vec![question("only", "x", 1)]).unwrap();
        let mut session = QuizSession::new(quiz, fixed_now());

        assert!(session.navigator().is_first());
        assert!(session.navigator().is_last());
        assert!(!session.next());
        assert!(session.submit(fixed_now()));
    }
}
