use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Shape errors detected while constructing a [`Course`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course must contain at least one module")]
    NoModules,

    #[error("invalid video url: {0}")]
    InvalidVideoUrl(String),
}

//
// ─── VIDEO URL ─────────────────────────────────────────────────────────────────
//

/// A validated link to a supplementary video for a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoUrl(Url);

impl VideoUrl {
    /// Parses and validates a video URL string.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::InvalidVideoUrl` if the string is not a URL.
    pub fn parse(raw: &str) -> Result<Self, CourseError> {
        Url::parse(raw)
            .map(Self)
            .map_err(|_| CourseError::InvalidVideoUrl(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Rewrites a YouTube watch link into its embeddable form, as the
    /// player page expects. Non-watch links pass through unchanged.
    #[must_use]
    pub fn embed_url(&self) -> String {
        self.0.as_str().replace("watch?v=", "embed/")
    }
}

//
// ─── COURSE CONTENT ────────────────────────────────────────────────────────────
//

/// One concept inside a module's detailed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSection {
    pub concept: String,
    pub explanation: String,
    pub example: String,
    pub real_world_relevance: String,
}

/// A single module of a generated course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    #[serde(rename = "moduleTitle")]
    pub title: String,
    #[serde(rename = "moduleOverview")]
    pub overview: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub detailed_content: Vec<ConceptSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<VideoUrl>,
}

/// A complete generated course as produced by the generation service.
///
/// The service owns the content; this type only guarantees the shape the
/// rest of the system relies on (a title and at least one module).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    title: String,
    overview: String,
    modules: Vec<CourseModule>,
}

impl Course {
    /// Validates and builds a course.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` when the title is empty or no modules exist.
    pub fn new(
        title: impl Into<String>,
        overview: impl Into<String>,
        modules: Vec<CourseModule>,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        if modules.is_empty() {
            return Err(CourseError::NoModules);
        }
        Ok(Self {
            title,
            overview: overview.into(),
            modules,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn overview(&self) -> &str {
        &self.overview
    }

    #[must_use]
    pub fn modules(&self) -> &[CourseModule] {
        &self.modules
    }
}

//
// ─── MIND MAP ──────────────────────────────────────────────────────────────────
//

/// Node role within a mind-map tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MindMapKind {
    Root,
    Module,
    Topic,
}

/// One node of the mind map derived from a course.
///
/// Produced by the generation service and displayed as-is; the tree is
/// root → modules → topics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MindMapKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindMapNode>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
