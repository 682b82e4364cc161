use thiserror::Error;

use crate::model::{CourseError, QuizDefinitionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    QuizDefinition(#[from] QuizDefinitionError),
    #[error(transparent)]
    Course(#[from] CourseError),
}
