use chrono::Duration;
use craftify_core::model::{ConceptSection, Course, CourseId, CourseModule, VideoUrl};
use craftify_core::time::fixed_now;
use storage::repository::{CourseHistoryRepository, CourseRecord, Storage, StorageError};
use storage::sqlite::SqliteRepository;

fn build_course(title: &str) -> Course {
    let module = CourseModule {
        title: format!("{title} module"),
        overview: "What this module covers".into(),
        key_topics: vec!["Basics".into(), "Practice".into()],
        detailed_content: vec![ConceptSection {
            concept: "Core idea".into(),
            explanation: "Why it matters".into(),
            example: "A worked example".into(),
            real_world_relevance: "Where it shows up".into(),
        }],
        video_url: Some(VideoUrl::parse("https://www.youtube.com/watch?v=abc").unwrap()),
    };
    Course::new(title, "Generated overview", vec![module]).unwrap()
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_modules() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = CourseId::random();
    let record = CourseRecord::from_course(id, fixed_now(), &build_course("Rust"));
    repo.append_course(&record).await.unwrap();

    let fetched = repo.get_course(id).await.expect("fetch");
    assert_eq!(fetched.title, "Rust");
    assert_eq!(fetched.modules.len(), 1);
    assert_eq!(fetched.modules[0].key_topics.len(), 2);
    assert_eq!(
        fetched.modules[0].video_url.as_ref().map(VideoUrl::as_str),
        Some("https://www.youtube.com/watch?v=abc")
    );

    let course = fetched.into_course().expect("valid course");
    assert_eq!(course.modules()[0].detailed_content[0].concept, "Core idea");
}

#[tokio::test]
async fn sqlite_lists_newest_first_and_rejects_duplicates() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_history?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let now = fixed_now();
    let older = CourseRecord::from_course(CourseId::random(), now, &build_course("Older"));
    let newer = CourseRecord::from_course(
        CourseId::random(),
        now + Duration::minutes(10),
        &build_course("Newer"),
    );

    repo.append_course(&older).await.unwrap();
    repo.append_course(&newer).await.unwrap();

    let err = repo.append_course(&older).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));

    let listed = repo.list_courses(10).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "Newer");
    assert_eq!(listed[1].title, "Older");

    let limited = repo.list_courses(1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].title, "Newer");
}

#[tokio::test]
async fn storage_facade_wires_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_facade?mode=memory&cache=shared")
        .await
        .expect("connect and migrate");

    let record = CourseRecord::from_course(CourseId::random(), fixed_now(), &build_course("Rust"));
    storage.courses.append_course(&record).await.unwrap();

    let listed = storage.courses.list_courses(10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Rust");
}

#[tokio::test]
async fn sqlite_get_missing_course_is_not_found() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_missing?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let err = repo.get_course(CourseId::random()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
