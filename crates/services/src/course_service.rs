use std::sync::Arc;

use craftify_core::Clock;
use craftify_core::model::{Course, CourseId, MindMapNode, QuizDefinition, VideoUrl};
use storage::repository::{CourseHistoryRepository, CourseRecord, Storage};

use crate::error::CourseServiceError;
use crate::generation_service::{Difficulty, GenerationService};
use crate::quiz::QuizRunner;

/// Facade over generation and history that hides the repository and the
/// time source from the presentation layer.
///
/// This service owns:
/// - the time source (`Clock`)
/// - the generation-service client
/// - history repository access
#[derive(Clone)]
pub struct CourseService {
    clock: Clock,
    generation: GenerationService,
    history: Arc<dyn CourseHistoryRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(clock: Clock, generation: GenerationService, storage: Storage) -> Self {
        Self {
            clock,
            generation,
            history: storage.courses,
        }
    }

    #[must_use]
    pub fn in_memory(clock: Clock, generation: GenerationService) -> Self {
        Self::new(clock, generation, Storage::in_memory())
    }

    /// Generate a course and append it to the history log.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError` when generation or persistence fails.
    pub async fn generate_course(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<CourseRecord, CourseServiceError> {
        let course = self.generation.generate_course(topic, difficulty).await?;
        self.record_course(&course).await
    }

    /// Append an already validated course to the history log with a fresh
    /// id and a clock timestamp.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` on repository failures.
    pub async fn record_course(&self, course: &Course) -> Result<CourseRecord, CourseServiceError> {
        let record = CourseRecord::from_course(CourseId::random(), self.clock.now(), course);
        self.history.append_course(&record).await?;
        Ok(record)
    }

    /// List history entries newest first.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` on repository failures.
    pub async fn list_history(&self, limit: u32) -> Result<Vec<CourseRecord>, CourseServiceError> {
        Ok(self.history.list_courses(limit).await?)
    }

    /// Fetch a history entry by id.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Storage` when missing or on repository
    /// failures.
    pub async fn get_course(&self, id: CourseId) -> Result<CourseRecord, CourseServiceError> {
        Ok(self.history.get_course(id).await?)
    }

    /// Generate a quiz definition for a topic.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Generation` when generation fails or
    /// the returned definition is malformed.
    pub async fn generate_quiz(&self, topic: &str) -> Result<QuizDefinition, CourseServiceError> {
        Ok(self.generation.generate_quiz(topic).await?)
    }

    /// Start a timed attempt against a definition, with the countdown
    /// driven by this service's clock.
    ///
    /// Must be called within a tokio runtime.
    #[must_use]
    pub fn start_quiz(&self, definition: QuizDefinition) -> QuizRunner {
        QuizRunner::start(definition, self.clock)
    }

    /// Generate a mind map from a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Generation` when generation fails.
    pub async fn generate_mindmap(
        &self,
        course: &Course,
    ) -> Result<MindMapNode, CourseServiceError> {
        Ok(self.generation.generate_mindmap(course).await?)
    }

    /// Look up a supplementary video for a module topic.
    ///
    /// # Errors
    ///
    /// Returns `CourseServiceError::Generation` when lookup fails or no
    /// video exists.
    pub async fn find_video(&self, topic: &str) -> Result<VideoUrl, CourseServiceError> {
        Ok(self.generation.find_video(topic).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftify_core::model::CourseModule;
    use craftify_core::time::fixed_clock;

    fn build_course(title: &str) -> Course {
        let module = CourseModule {
            title: "Module".into(),
            overview: "Overview".into(),
            key_topics: Vec::new(),
            detailed_content: Vec::new(),
            video_url: None,
        };
        Course::new(title, "Overview", vec![module]).unwrap()
    }

    #[tokio::test]
    async fn records_and_lists_history() {
        let svc = CourseService::in_memory(fixed_clock(), GenerationService::new(None));

        let record = svc.record_course(&build_course("Rust")).await.unwrap();
        assert_eq!(record.title, "Rust");
        assert_eq!(record.created_at, fixed_clock().now());

        let listed = svc.list_history(10).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);

        let fetched = svc.get_course(record.id).await.unwrap();
        assert_eq!(fetched.title, "Rust");
    }

    #[tokio::test]
    async fn generation_failure_surfaces_without_history_write() {
        let svc = CourseService::in_memory(fixed_clock(), GenerationService::new(None));

        let err = svc
            .generate_course("rust", Difficulty::Beginner)
            .await
            .unwrap_err();
        assert!(matches!(err, CourseServiceError::Generation(_)));

        assert!(svc.list_history(10).await.unwrap().is_empty());
    }
}
