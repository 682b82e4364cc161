//! Shared error types for the services crate.

use thiserror::Error;

use craftify_core::model::{CourseError, QuizDefinitionError};
use storage::repository::StorageError;

/// Errors emitted by `GenerationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("generation service is not configured")]
    Disabled,
    #[error("generation service returned an empty response")]
    EmptyResponse,
    #[error("generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("generated quiz is malformed: {0}")]
    MalformedQuiz(#[from] QuizDefinitionError),
    #[error("generated quiz time limit of {0} minutes is out of range")]
    TimeLimitOutOfRange(u32),
    #[error("generated course is malformed: {0}")]
    MalformedCourse(#[from] CourseError),
}

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
