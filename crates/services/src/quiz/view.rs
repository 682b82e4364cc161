use craftify_core::model::{OptionId, QuestionId};
use craftify_core::session::{Phase, QuizSession};

/// Point-in-time view of a running quiz session, useful for UI.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no layout assumptions
///
/// The UI may format the countdown (mm:ss, progress bars) as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub phase: Phase,
    pub current_index: usize,
    pub total_questions: usize,
    pub remaining_seconds: u32,
    pub answered_count: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub current_question_id: QuestionId,
    /// The user's current choice for the question on screen, if any.
    pub current_selection: Option<OptionId>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let question = session.current_question();
        Self {
            phase: session.phase(),
            current_index: session.current_index(),
            total_questions: session.definition().question_count(),
            remaining_seconds: session.remaining_seconds(),
            answered_count: session.ledger().answered_count(),
            is_first: session.navigator().is_first(),
            is_last: session.navigator().is_last(),
            current_question_id: question.id.clone(),
            current_selection: session.ledger().selected(&question.id).cloned(),
        }
    }
}
