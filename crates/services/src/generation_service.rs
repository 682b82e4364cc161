use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use craftify_core::model::{
    Course, CourseModule, MindMapNode, Question, QuizDefinition, VideoUrl,
};

use crate::error::GenerationError;

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub base_url: String,
}

impl GenerationConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("CRAFTIFY_API_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self { base_url })
    }
}

/// Requested difficulty for a generated course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Client for the remote generation service.
///
/// Courses, quizzes, mind maps, and video lookups are all produced
/// remotely; this client only validates the shape of what comes back.
/// Requests are fire-and-forget: a failure surfaces as a typed error and
/// is never retried here.
#[derive(Clone)]
pub struct GenerationService {
    client: Client,
    config: Option<GenerationConfig>,
}

impl GenerationService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GenerationConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GenerationConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<String, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;
        Ok(format!("{}/{path}", config.base_url.trim_end_matches('/')))
    }

    async fn post<Req, Resp>(&self, path: &str, payload: &Req) -> Result<Resp, GenerationError>
    where
        Req: Serialize,
        Resp: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(payload).send().await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Generate a course for a topic at the given difficulty.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the service is disabled, the request
    /// fails, or the returned course is malformed.
    pub async fn generate_course(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Course, GenerationError> {
        let payload = CourseRequest {
            topic: topic.to_string(),
            difficulty,
        };
        let wire: CourseWire = self.post("generate-course/", &payload).await?;
        Ok(wire.into_course()?)
    }

    /// Generate a timed quiz for a topic.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the service is disabled, the request
    /// fails, or the returned definition is malformed.
    pub async fn generate_quiz(&self, topic: &str) -> Result<QuizDefinition, GenerationError> {
        let payload = TopicRequest {
            topic: topic.to_string(),
        };
        let wire: QuizWire = self.post("generate-quiz/", &payload).await?;
        wire.into_definition()
    }

    /// Generate a mind map from an already generated course.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the service is disabled or the
    /// request fails.
    pub async fn generate_mindmap(&self, course: &Course) -> Result<MindMapNode, GenerationError> {
        self.post("generate-mindmap/", course).await
    }

    /// Look up a supplementary video for a module topic.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::EmptyResponse` when no video exists for
    /// the topic.
    pub async fn find_video(&self, topic: &str) -> Result<VideoUrl, GenerationError> {
        let payload = TopicRequest {
            topic: topic.to_string(),
        };
        let wire: VideoWire = self.post("get-video/", &payload).await?;
        let raw = wire.video_url.ok_or(GenerationError::EmptyResponse)?;
        Ok(VideoUrl::parse(&raw)?)
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct CourseRequest {
    topic: String,
    difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
struct TopicRequest {
    topic: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CourseWire {
    course_title: String,
    course_overview: String,
    #[serde(default)]
    modules: Vec<CourseModule>,
}

impl CourseWire {
    pub(crate) fn into_course(self) -> Result<Course, craftify_core::model::CourseError> {
        Course::new(self.course_title, self.course_overview, self.modules)
    }
}

/// Quiz payload as the service emits it: `timeLimit` is in minutes and
/// `totalQuestions` is redundant with the question list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizWire {
    quiz_title: String,
    #[serde(default, rename = "totalQuestions")]
    _total_questions: Option<u32>,
    time_limit: u32,
    #[serde(default)]
    questions: Vec<Question>,
}

impl QuizWire {
    /// Converts wire minutes to engine seconds. The supplied limit is
    /// honored as-is; overriding it client-side was a bug in the original
    /// UI and is not reproduced.
    pub(crate) fn into_definition(self) -> Result<QuizDefinition, GenerationError> {
        let seconds = self
            .time_limit
            .checked_mul(60)
            .ok_or(GenerationError::TimeLimitOutOfRange(self.time_limit))?;
        Ok(QuizDefinition::new(self.quiz_title, seconds, self.questions)?)
    }
}

#[derive(Debug, Deserialize)]
struct VideoWire {
    video_url: Option<String>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
