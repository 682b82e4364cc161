use async_trait::async_trait;
use chrono::{DateTime, Utc};
use craftify_core::model::{Course, CourseError, CourseId, CourseModule};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for one course-history entry.
///
/// Mirrors the domain `Course` plus the log metadata (id, creation time)
/// so repositories can serialize without leaking storage concerns into
/// the domain layer.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub overview: String,
    pub modules: Vec<CourseModule>,
}

impl CourseRecord {
    #[must_use]
    pub fn from_course(id: CourseId, created_at: DateTime<Utc>, course: &Course) -> Self {
        Self {
            id,
            created_at,
            title: course.title().to_owned(),
            overview: course.overview().to_owned(),
            modules: course.modules().to_vec(),
        }
    }

    /// Convert the record back into a domain `Course`.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the persisted shape fails validation.
    pub fn into_course(self) -> Result<Course, CourseError> {
        Course::new(self.title, self.overview, self.modules)
    }
}

/// Repository contract for the course-history log.
///
/// The history is append-only and ordered: entries are listed newest
/// first and are never updated in place.
#[async_trait]
pub trait CourseHistoryRepository: Send + Sync {
    /// Append a course to the history log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id already exists, or other
    /// storage errors.
    async fn append_course(&self, record: &CourseRecord) -> Result<(), StorageError>;

    /// Fetch a history entry by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_course(&self, id: CourseId) -> Result<CourseRecord, StorageError>;

    /// List history entries newest first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    async fn list_courses(&self, limit: u32) -> Result<Vec<CourseRecord>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<HashMap<CourseId, CourseRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            courses: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CourseHistoryRepository for InMemoryRepository {
    async fn append_course(&self, record: &CourseRecord) -> Result<(), StorageError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&record.id) {
            return Err(StorageError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_course(&self, id: CourseId) -> Result<CourseRecord, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_courses(&self, limit: u32) -> Result<Vec<CourseRecord>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut records: Vec<CourseRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }
}

/// Aggregates the history repository behind a trait object for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseHistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let courses: Arc<dyn CourseHistoryRepository> = Arc::new(repo);
        Self { courses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use craftify_core::time::fixed_now;

    fn build_course(title: &str) -> Course {
        let module = CourseModule {
            title: "Module".into(),
            overview: "Overview".into(),
            key_topics: vec!["Topic".into()],
            detailed_content: Vec::new(),
            video_url: None,
        };
        Course::new(title, "Course overview", vec![module]).unwrap()
    }

    #[tokio::test]
    async fn round_trips_course_record() {
        let repo = InMemoryRepository::new();
        let id = CourseId::random();
        let record = CourseRecord::from_course(id, fixed_now(), &build_course("Rust"));

        repo.append_course(&record).await.unwrap();

        let fetched = repo.get_course(id).await.unwrap();
        assert_eq!(fetched.title, "Rust");
        let course = fetched.into_course().unwrap();
        assert_eq!(course.modules().len(), 1);
    }

    #[tokio::test]
    async fn appending_same_id_conflicts() {
        let repo = InMemoryRepository::new();
        let record =
            CourseRecord::from_course(CourseId::random(), fixed_now(), &build_course("Rust"));

        repo.append_course(&record).await.unwrap();
        let err = repo.append_course(&record).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();

        let older =
            CourseRecord::from_course(CourseId::random(), now, &build_course("Older"));
        let newer = CourseRecord::from_course(
            CourseId::random(),
            now + Duration::minutes(5),
            &build_course("Newer"),
        );
        repo.append_course(&older).await.unwrap();
        repo.append_course(&newer).await.unwrap();

        let listed = repo.list_courses(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Newer");
        assert_eq!(listed[1].title, "Older");

        let limited = repo.list_courses(1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].title, "Newer");
    }
}
