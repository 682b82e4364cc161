#![forbid(unsafe_code)]

//! Persistence layer for the course-history log: an async repository
//! contract with in-memory and `SQLite` adapters.

pub mod repository;
pub mod sqlite;

pub use repository::{CourseHistoryRepository, CourseRecord, InMemoryRepository, Storage};
pub use sqlite::{SqliteInitError, SqliteRepository};
