//! Emotion diary use-cases.

use crate::model::emotion::find_emotion;
use crate::model::record::{next_record_id, EmotionRecord, RecordId};
use crate::model::stamp::{date_stamp, epoch_millis, time_stamp};
use crate::service::collection::{load_collection, save_collection};
use crate::service::{ServiceError, ServiceResult};
use crate::store::{RecordSource, RecordStore};
use chrono::{DateTime, Local};
use log::info;

const SOURCE: RecordSource = RecordSource::Diary;

/// Producer owning the `diario` key.
pub struct DiaryService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> DiaryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_entries(&self) -> ServiceResult<Vec<EmotionRecord>> {
        load_collection(&self.store, SOURCE).await
    }

    /// Records an emotion from the catalog with an optional note.
    pub async fn add_entry(
        &self,
        emotion: &str,
        note: impl Into<String>,
    ) -> ServiceResult<EmotionRecord> {
        self.add_entry_at(emotion, note, Local::now())
            .await
    }

    pub async fn add_entry_at(
        &self,
        emotion: &str,
        note: impl Into<String>,
        now: DateTime<Local>,
    ) -> ServiceResult<EmotionRecord> {
        let emotion = find_emotion(emotion)
            .ok_or(ServiceError::InvalidInput("emotion must be one of the catalog symbols"))?;

        let mut entries = self.list_entries().await?;
        let entry = EmotionRecord {
            id: next_record_id(epoch_millis(now), entries.iter().map(|entry| entry.id)),
            emotion: emotion.symbol.to_string(),
            note: note.into(),
            date: date_stamp(now),
            time: time_stamp(now),
        };
        entries.insert(0, entry.clone());
        save_collection(&self.store, SOURCE, &entries).await?;

        info!(
            "event=diary_add module=service status=ok id={} emotion={} has_note={}",
            entry.id,
            emotion.name,
            !entry.note.is_empty()
        );
        Ok(entry)
    }

    pub async fn delete_entry(&self, id: RecordId) -> ServiceResult<()> {
        let mut entries = self.list_entries().await?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(ServiceError::NotFound { source: SOURCE, id });
        }
        save_collection(&self.store, SOURCE, &entries).await?;

        info!("event=diary_delete module=service status=ok id={id}");
        Ok(())
    }
}
