use craftify_core::model::{CourseId, CourseModule};
use sqlx::Row;
use uuid::Uuid;

use super::SqliteRepository;
use crate::repository::{CourseHistoryRepository, CourseRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn course_id_from_str(raw: &str) -> Result<CourseId, StorageError> {
    Uuid::parse_str(raw)
        .map(CourseId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid course id: {raw}")))
}

fn map_course_row(row: &sqlx::sqlite::SqliteRow) -> Result<CourseRecord, StorageError> {
    let id = course_id_from_str(row.try_get::<String, _>("id").map_err(ser)?.as_str())?;
    let created_at = row.try_get("created_at").map_err(ser)?;
    let title: String = row.try_get("title").map_err(ser)?;
    let overview: String = row.try_get("overview").map_err(ser)?;
    // Modules are a nested document; stored as a JSON column.
    let modules_json: String = row.try_get("modules").map_err(ser)?;
    let modules: Vec<CourseModule> = serde_json::from_str(&modules_json).map_err(ser)?;

    Ok(CourseRecord {
        id,
        created_at,
        title,
        overview,
        modules,
    })
}

#[async_trait::async_trait]
impl CourseHistoryRepository for SqliteRepository {
    async fn append_course(&self, record: &CourseRecord) -> Result<(), StorageError> {
        let modules_json = serde_json::to_string(&record.modules).map_err(ser)?;

        let res = sqlx::query(
            r"
                INSERT INTO course_history (id, created_at, title, overview, modules)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(record.id.value().to_string())
        .bind(record.created_at)
        .bind(&record.title)
        .bind(&record.overview)
        .bind(modules_json)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::Conflict);
        }
        Ok(())
    }

    async fn get_course(&self, id: CourseId) -> Result<CourseRecord, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, created_at, title, overview, modules
                FROM course_history
                WHERE id = ?1
            ",
        )
        .bind(id.value().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .ok_or(StorageError::NotFound)?;

        map_course_row(&row)
    }

    async fn list_courses(&self, limit: u32) -> Result<Vec<CourseRecord>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, created_at, title, overview, modules
                FROM course_history
                ORDER BY created_at DESC, id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_course_row(&row)?);
        }

        Ok(out)
    }
}
