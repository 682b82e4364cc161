use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::ids::{OptionId, QuestionId};

/// Record of the user's in-progress answer choices.
///
/// One entry per answered question; re-selecting overwrites. A question
/// with no entry is unanswered. Entries are never pruned; the results
/// report is derived from whatever the ledger holds when the session
/// freezes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLedger {
    entries: HashMap<QuestionId, OptionId>,
}

impl AnswerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a selection for a question, overwriting any prior choice.
    pub fn select(&mut self, question_id: QuestionId, option_id: OptionId) {
        self.entries.insert(question_id, option_id);
    }

    /// Returns the selected option for a question, or `None` if unanswered.
    #[must_use]
    pub fn selected(&self, question_id: &QuestionId) -> Option<&OptionId> {
        self.entries.get(question_id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
