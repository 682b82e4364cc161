mod course;
mod ids;
mod ledger;
mod quiz;
mod report;

pub use course::{
    ConceptSection, Course, CourseError, CourseModule, MindMapKind, MindMapNode, VideoUrl,
};
pub use ids::{CourseId, OptionId, QuestionId};
pub use ledger::AnswerLedger;
pub use quiz::{Question, QuizDefinition, QuizDefinitionError, QuizOption};
pub use report::{QuestionReport, QuizReport};
