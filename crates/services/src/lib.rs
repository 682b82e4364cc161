#![forbid(unsafe_code)]

pub mod course_service;
pub mod error;
pub mod generation_service;
pub mod quiz;

pub use craftify_core::Clock;

pub use course_service::CourseService;
pub use error::{CourseServiceError, GenerationError};
pub use generation_service::{Difficulty, GenerationConfig, GenerationService};
pub use quiz::{QuizRunner, QuizSnapshot};
