use serde::Serialize;

use crate::model::ids::QuestionId;
use crate::model::ledger::AnswerLedger;
use crate::model::quiz::QuizDefinition;

//
// ─── PER-QUESTION ENTRY ────────────────────────────────────────────────────────
//

/// Scored breakdown for one question in the results report.
///
/// The correct option text is always computed; whether to surface it for
/// correct answers is a display decision, not a scoring one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionReport {
    pub question_id: QuestionId,
    pub prompt: String,
    /// Text of the option the user chose, `None` when unanswered.
    pub chosen_text: Option<String>,
    pub correct_text: String,
    pub is_correct: bool,
    /// Full question points when correct, zero otherwise. No partial credit.
    pub points_awarded: u32,
    pub points_possible: u32,
}

//
// ─── QUIZ REPORT ───────────────────────────────────────────────────────────────
//

/// Frozen scoring breakdown for a finished quiz attempt.
///
/// A pure function of the definition's answer key and the final ledger:
/// reproducible from those two values alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizReport {
    title: String,
    total_score: u32,
    max_score: u32,
    entries: Vec<QuestionReport>,
}

impl QuizReport {
    /// Scores a ledger against a quiz definition.
    #[must_use]
    pub fn score(definition: &QuizDefinition, ledger: &AnswerLedger) -> Self {
        let mut total_score = 0_u32;
        let mut entries = Vec::with_capacity(definition.question_count());

        for question in definition.questions() {
            let chosen = ledger.selected(&question.id);
            let is_correct = chosen == Some(&question.correct_option_id);
            let points_awarded = if is_correct { question.points } else { 0 };
            total_score += points_awarded;

            let chosen_text = chosen
                .and_then(|id| question.option(id))
                .map(|opt| opt.text.clone());

            entries.push(QuestionReport {
                question_id: question.id.clone(),
                prompt: question.prompt.clone(),
                chosen_text,
                correct_text: question.correct_option_text().to_owned(),
                is_correct,
                points_awarded,
                points_possible: question.points,
            });
        }

        Self {
            title: definition.title().to_owned(),
            total_score,
            max_score: definition.max_score(),
            entries,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Score as a percentage of the maximum.
    ///
    /// A quiz where every question is worth zero points is a valid
    /// degenerate input and scores `0.0` rather than dividing by zero.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            f64::from(self.total_score) / f64::from(self.max_score) * 100.0
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[QuestionReport] {
        &self.entries
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
