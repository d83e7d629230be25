//! Audio note use-cases.
//!
//! Recording and playback belong to the platform; this service only keeps
//! the catalog of finished recordings and their URIs.

use crate::model::record::{next_record_id, AudioRecord, RecordId};
use crate::model::stamp::{date_stamp, epoch_millis, short_time_stamp};
use crate::service::collection::{load_collection, require_text, save_collection};
use crate::service::{ServiceError, ServiceResult};
use crate::store::{RecordSource, RecordStore};
use chrono::{DateTime, Local};
use log::info;

const SOURCE: RecordSource = RecordSource::AudioNotes;

/// Producer owning the `audioNotes` key.
pub struct AudioNoteService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> AudioNoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_notes(&self) -> ServiceResult<Vec<AudioRecord>> {
        load_collection(&self.store, SOURCE).await
    }

    /// Stores a finished recording located at `uri`.
    pub async fn record_note(&self, uri: impl Into<String>) -> ServiceResult<AudioRecord> {
        self.record_note_at(uri, Local::now()).await
    }

    pub async fn record_note_at(
        &self,
        uri: impl Into<String>,
        now: DateTime<Local>,
    ) -> ServiceResult<AudioRecord> {
        let uri = uri.into();
        require_text(&uri, "recording uri cannot be empty")?;

        let mut notes = self.list_notes().await?;
        let note = AudioRecord {
            id: next_record_id(epoch_millis(now), notes.iter().map(|note| note.id)),
            uri,
            date: date_stamp(now),
            time: short_time_stamp(now),
        };
        notes.insert(0, note.clone());
        save_collection(&self.store, SOURCE, &notes).await?;

        info!(
            "event=audio_add module=service status=ok id={} count={}",
            note.id,
            notes.len()
        );
        Ok(note)
    }

    pub async fn delete_note(&self, id: RecordId) -> ServiceResult<()> {
        let mut notes = self.list_notes().await?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(ServiceError::NotFound { source: SOURCE, id });
        }
        save_collection(&self.store, SOURCE, &notes).await?;

        info!("event=audio_delete module=service status=ok id={id}");
        Ok(())
    }
}
