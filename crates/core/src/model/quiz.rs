use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Shape errors detected while constructing a [`QuizDefinition`].
///
/// The generation service owns content quality; this only rejects
/// definitions no session could run against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizDefinitionError {
    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("quiz time limit must be > 0 seconds")]
    ZeroTimeLimit,

    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(QuestionId),

    #[error("question {0} has no options")]
    NoOptions(QuestionId),

    #[error("question {question} has duplicate option id: {option}")]
    DuplicateOptionId {
        question: QuestionId,
        option: OptionId,
    },

    #[error("question {question} marks unknown option {option} as correct")]
    UnknownCorrectOption {
        question: QuestionId,
        option: OptionId,
    },
}

//
// ─── OPTION & QUESTION ─────────────────────────────────────────────────────────
//

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: OptionId,
    pub text: String,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A single multiple-choice question with its answer key.
///
/// Field names follow the generation service's JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub correct_option_id: OptionId,
    pub points: u32,
}

impl Question {
    /// Looks up an option by id.
    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&QuizOption> {
        self.options.iter().find(|opt| &opt.id == id)
    }

    /// Returns the text of the correct option.
    ///
    /// A validated definition guarantees the answer key resolves, so this
    /// never fails on questions taken from a [`QuizDefinition`].
    #[must_use]
    pub fn correct_option_text(&self) -> &str {
        self.option(&self.correct_option_id)
            .map_or("", |opt| opt.text.as_str())
    }
}

//
// ─── QUIZ DEFINITION ───────────────────────────────────────────────────────────
//

/// Immutable description of a quiz: questions, answer key, and the total
/// time budget for the whole attempt.
///
/// Only validated definitions exist; [`QuizDefinition::new`] is the single
/// entry point and rejects any shape a session could not run against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizDefinition {
    title: String,
    time_limit_seconds: u32,
    questions: Vec<Question>,
}

impl QuizDefinition {
    /// Validates and builds a quiz definition.
    ///
    /// # Errors
    ///
    /// Returns `QuizDefinitionError` when the definition has no questions,
    /// a zero time limit, duplicate ids, or an answer key pointing at an
    /// option that does not exist.
    pub fn new(
        title: impl Into<String>,
        time_limit_seconds: u32,
        questions: Vec<Question>,
    ) -> Result<Self, QuizDefinitionError> {
        if questions.is_empty() {
            return Err(QuizDefinitionError::NoQuestions);
        }
        if time_limit_seconds == 0 {
            return Err(QuizDefinitionError::ZeroTimeLimit);
        }

        let mut seen_questions = HashSet::new();
        for question in &questions {
            if !seen_questions.insert(question.id.clone()) {
                return Err(QuizDefinitionError::DuplicateQuestionId(
                    question.id.clone(),
                ));
            }
            if question.options.is_empty() {
                return Err(QuizDefinitionError::NoOptions(question.id.clone()));
            }

            let mut seen_options = HashSet::new();
            for option in &question.options {
                if !seen_options.insert(option.id.clone()) {
                    return Err(QuizDefinitionError::DuplicateOptionId {
                        question: question.id.clone(),
                        option: option.id.clone(),
                    });
                }
            }
            if !seen_options.contains(&question.correct_option_id) {
                return Err(QuizDefinitionError::UnknownCorrectOption {
                    question: question.id.clone(),
                    option: question.correct_option_id.clone(),
                });
            }
        }

        Ok(Self {
            title: title.into(),
            time_limit_seconds,
            questions,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Total time budget for the whole quiz, not per question.
    #[must_use]
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Looks up a question by id.
    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Sum of points across all questions, independent of any answers.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: &str, points: u32) -> Question {
        Question {
            id: QuestionId::new(id),
            prompt: format!("Prompt {id}"),
            options: vec![
                QuizOption::new("a", "Alpha"),
                QuizOption::new("b", "Beta"),
            ],
            correct_option_id: OptionId::new(correct),
            points,
        }
    }

    #[test]
    fn builds_valid_definition() {
        let quiz = QuizDefinition::new("Rust Basics", 600, vec![question("q1", "a", 5)]).unwrap();
        assert_eq!(quiz.title(), "Rust Basics");
        assert_eq!(quiz.time_limit_seconds(), 600);
        assert_eq!(quiz.question_count(), 1);
        assert_eq!(quiz.max_score(), 5);
    }

    #[test]
    fn rejects_empty_question_list() {
        let err = QuizDefinition::new("Empty", 600, Vec::new()).unwrap_err();
        assert_eq!(err, QuizDefinitionError::NoQuestions);
    }

    #[test]
    fn rejects_zero_time_limit() {
        let err = QuizDefinition::new("No time", 0, vec![question("q1", "a", 5)]).unwrap_err();
        assert_eq!(err, QuizDefinitionError::ZeroTimeLimit);
    }

    #[test]
    fn rejects_unknown_correct_option() {
        let err = QuizDefinition::new("Bad key", 600, vec![question("q1", "z", 5)]).unwrap_err();
        assert!(matches!(
            err,
            QuizDefinitionError::UnknownCorrectOption { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let err = QuizDefinition::new(
            "Dup",
            600,
            vec![question("q1", "a", 5), question("q1", "b", 5)],
        )
        .unwrap_err();
        assert!(matches!(err, QuizDefinitionError::DuplicateQuestionId(_)));
    }

    #[test]
    fn rejects_duplicate_option_ids() {
        let mut broken = question("q1", "a", 5);
        broken.options.push(QuizOption::new("a", "Alpha again"));
        let err = QuizDefinition::new("Dup opts", 600, vec![broken]).unwrap_err();
        assert!(matches!(err, QuizDefinitionError::DuplicateOptionId { .. }));
    }

    #[test]
    fn rejects_question_without_options() {
        let mut broken = question("q1", "a", 5);
        broken.options.clear();
        let err = QuizDefinition::new("No opts", 600, vec![broken]).unwrap_err();
        assert!(matches!(err, QuizDefinitionError::NoOptions(_)));
    }

    #[test]
    fn max_score_sums_all_points() {
        let quiz = QuizDefinition::new(
            "Sum",
            600,
            vec![
                question("q1", "a", 5),
                question("q2", "b", 3),
                question("q3", "a", 0),
            ],
        )
        .unwrap();
        assert_eq!(quiz.max_score(), 8);
    }

    #[test]
    fn correct_option_text_resolves() {
        let quiz = QuizDefinition::new("Text", 600, vec![question("q1", "b", 5)]).unwrap();
        assert_eq!(quiz.questions()[0].correct_option_text(), "Beta");
    }
}
