use chrono::{DateTime, Local, NaiveDate, TimeZone};
use equilibre_core::{
    erase_all_data, AudioNoteService, DiaryService, MemoryRecordStore, RecordSource, RecordStore,
    ServiceError, TaskService,
};
use std::sync::Arc;

fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Local> {
    let wall_clock = NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap();
    Local.from_local_datetime(&wall_clock).single().unwrap()
}

#[tokio::test]
async fn tasks_are_prepended_and_stamped() {
    let store = Arc::new(MemoryRecordStore::new());
    let tasks = TaskService::new(Arc::clone(&store));

    let first = tasks.add_task_at("first", at(1, 9, 0, 0)).await.unwrap();
    let second = tasks.add_task_at("second", at(2, 14, 30, 5)).await.unwrap();

    assert_eq!(first.created_at, "1/1/2024, 9:00:00 AM");
    assert_eq!(second.created_at, "1/2/2024, 2:30:05 PM");
    assert!(!second.completed);

    let stored = tasks.list_tasks().await.unwrap();
    let texts: Vec<&str> = stored.iter().map(|task| task.text.as_str()).collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[tokio::test]
async fn task_id_is_creation_epoch_millis() {
    let tasks = TaskService::new(MemoryRecordStore::new());
    let now = at(5, 6, 30, 0);

    let task = tasks.add_task_at("breathe", now).await.unwrap();

    assert_eq!(task.id, now.timestamp_millis());
}

#[tokio::test]
async fn same_millisecond_tasks_get_distinct_ids() {
    let tasks = TaskService::new(MemoryRecordStore::new());
    let now = at(1, 9, 0, 0);

    let first = tasks.add_task_at("a", now).await.unwrap();
    let second = tasks.add_task_at("b", now).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.id, first.id + 1);
}

#[tokio::test]
async fn toggling_stamps_then_clears_completion() {
    let tasks = TaskService::new(MemoryRecordStore::new());
    let task = tasks.add_task_at("stretch", at(1, 7, 0, 0)).await.unwrap();

    let done = tasks.toggle_task_at(task.id, at(1, 8, 15, 0)).await.unwrap();
    assert!(done.completed);
    assert_eq!(done.completed_at.as_deref(), Some("1/1/2024, 8:15:00 AM"));

    let reopened = tasks.toggle_task_at(task.id, at(1, 9, 0, 0)).await.unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);
    assert_eq!(tasks.list_tasks().await.unwrap()[0], reopened);
}

#[tokio::test]
async fn empty_task_text_is_rejected_without_writing() {
    let store = Arc::new(MemoryRecordStore::new());
    let tasks = TaskService::new(Arc::clone(&store));

    let err = tasks.add_task("   ").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(store.get("tasks").await.unwrap(), None);
}

#[tokio::test]
async fn unknown_ids_report_not_found() {
    let tasks = TaskService::new(MemoryRecordStore::new());
    let err = tasks.delete_task(99).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            source: RecordSource::Tasks,
            id: 99
        }
    ));

    let diary = DiaryService::new(MemoryRecordStore::new());
    assert!(matches!(
        diary.delete_entry(1).await.unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[tokio::test]
async fn malformed_payload_is_reported_and_left_untouched() {
    let store = Arc::new(MemoryRecordStore::with_entries([("tasks", "{not json")]));
    let tasks = TaskService::new(Arc::clone(&store));

    let err = tasks.add_task("new").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Decode {
            source: RecordSource::Tasks,
            ..
        }
    ));
    assert_eq!(store.get("tasks").await.unwrap().as_deref(), Some("{not json"));
}

#[tokio::test]
async fn diary_accepts_catalog_emotions_only() {
    let store = Arc::new(MemoryRecordStore::new());
    let diary = DiaryService::new(Arc::clone(&store));

    let entry = diary
        .add_entry_at("😊", "good walk", at(3, 20, 15, 0))
        .await
        .unwrap();
    assert_eq!(entry.date, "1/3/2024");
    assert_eq!(entry.time, "8:15:00 PM");
    assert_eq!(entry.note, "good walk");

    let err = diary.add_entry("🤖", "").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(diary.list_entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn audio_notes_use_short_time_and_own_key_only() {
    let store = Arc::new(MemoryRecordStore::new());
    let audio = AudioNoteService::new(Arc::clone(&store));

    let note = audio
        .record_note_at("file:///rec/1.m4a", at(4, 9, 5, 59))
        .await
        .unwrap();
    assert_eq!(note.date, "1/4/2024");
    assert_eq!(note.time, "09:05 AM");

    assert!(store.get("audioNotes").await.unwrap().is_some());
    assert_eq!(store.get("diario").await.unwrap(), None);
    assert_eq!(store.get("tasks").await.unwrap(), None);

    audio.delete_note(note.id).await.unwrap();
    assert!(audio.list_notes().await.unwrap().is_empty());
}

#[tokio::test]
async fn erase_all_data_removes_every_collection() {
    let store = Arc::new(MemoryRecordStore::new());
    TaskService::new(Arc::clone(&store))
        .add_task("t")
        .await
        .unwrap();
    DiaryService::new(Arc::clone(&store))
        .add_entry("😐", "")
        .await
        .unwrap();
    AudioNoteService::new(Arc::clone(&store))
        .record_note("file:///a.m4a")
        .await
        .unwrap();

    erase_all_data(store.as_ref()).await.unwrap();

    for source in RecordSource::ALL {
        assert_eq!(store.get(source.key()).await.unwrap(), None);
    }
}
