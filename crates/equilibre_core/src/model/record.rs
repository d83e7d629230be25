//! Persisted record shapes for audio notes, diary entries and tasks.
//!
//! # Invariants
//! - `TaskRecord::completed_at` is set only while `completed == true`.
//! - IDs derive from creation-time epoch milliseconds.
//! - Text and timestamp fields decode absent or `null` as `""`, so older
//!   payloads stay readable; only `id` is mandatory.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifier shared by every record kind; unique per collection only.
pub type RecordId = i64;

/// Audio note stored under `audioNotes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRecord {
    pub id: RecordId,
    /// Recording location handed over by the platform recorder.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
}

/// Emotion diary entry stored under `diario`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub id: RecordId,
    /// Emoji symbol picked from the emotion catalog.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emotion: String,
    /// Free text; empty when the user left it blank.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time: String,
}

/// Task stored under `tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl TaskRecord {
    /// Flips completion state, stamping or clearing `completed_at`.
    pub fn toggle(&mut self, stamp: impl Into<String>) {
        self.completed = !self.completed;
        self.completed_at = if self.completed {
            Some(stamp.into())
        } else {
            None
        };
    }
}

/// Any record from one of the three source collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainRecord {
    Audio(AudioRecord),
    Emotion(EmotionRecord),
    Task(TaskRecord),
}

impl DomainRecord {
    pub fn id(&self) -> RecordId {
        match self {
            Self::Audio(record) => record.id,
            Self::Emotion(record) => record.id,
            Self::Task(record) => record.id,
        }
    }
}

/// Allocates a record id from the creation clock.
///
/// Falls back to `max(existing) + 1` when the clock would collide with an id
/// already present in the same collection.
pub fn next_record_id(now_ms: i64, existing: impl IntoIterator<Item = RecordId>) -> RecordId {
    match existing.into_iter().max() {
        Some(max) if max >= now_ms => max.saturating_add(1),
        _ => now_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::{next_record_id, AudioRecord, DomainRecord, EmotionRecord, TaskRecord};

    #[test]
    fn task_record_uses_camel_case_and_omits_missing_completion() {
        let task = TaskRecord {
            id: 7,
            text: "water plants".to_string(),
            completed: false,
            created_at: "1/1/2024, 9:00:00 AM".to_string(),
            completed_at: None,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"text":"water plants","completed":false,"createdAt":"1/1/2024, 9:00:00 AM"}"#
        );
    }

    #[test]
    fn emotion_record_accepts_missing_note() {
        let entry: EmotionRecord =
            serde_json::from_str(r#"{"id":1,"emotion":"😀","date":"1/1/2024","time":"8:00:00 AM"}"#)
                .unwrap();
        assert_eq!(entry.note, "");
    }

    #[test]
    fn null_and_missing_fields_decode_as_empty() {
        let entry: EmotionRecord =
            serde_json::from_str(r#"{"id":1,"emotion":"😀","note":null,"date":null}"#).unwrap();
        assert_eq!(entry.note, "");
        assert_eq!(entry.date, "");
        assert_eq!(entry.time, "");

        let task: TaskRecord = serde_json::from_str(r#"{"id":2,"text":"legacy"}"#).unwrap();
        assert_eq!(task.created_at, "");
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn id_is_still_required() {
        assert!(serde_json::from_str::<AudioRecord>(r#"{"uri":"a"}"#).is_err());
    }

    #[test]
    fn toggle_stamps_and_clears_completion() {
        let mut task = TaskRecord {
            id: 1,
            text: "x".to_string(),
            completed: false,
            created_at: "1/1/2024".to_string(),
            completed_at: None,
        };
        task.toggle("1/2/2024, 10:00:00 AM");
        assert!(task.completed);
        assert_eq!(task.completed_at.as_deref(), Some("1/2/2024, 10:00:00 AM"));

        task.toggle("ignored");
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn domain_record_exposes_inner_id() {
        let audio = DomainRecord::Audio(AudioRecord {
            id: 42,
            uri: "file:///a.m4a".to_string(),
            date: "1/1/2024".to_string(),
            time: "10:00 AM".to_string(),
        });
        assert_eq!(audio.id(), 42);
    }

    #[test]
    fn next_record_id_prefers_clock_and_avoids_collisions() {
        assert_eq!(next_record_id(1_000, []), 1_000);
        assert_eq!(next_record_id(1_000, [10, 20]), 1_000);
        assert_eq!(next_record_id(1_000, [1_000]), 1_001);
        assert_eq!(next_record_id(1_000, [5_000, 3]), 5_001);
    }
}
