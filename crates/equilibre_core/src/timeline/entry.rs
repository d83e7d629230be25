//! Normalized timeline entries and the merge/sort step.
//!
//! # Invariants
//! - `id` is unique only within `kind`; two kinds may share an id value.
//! - Merge order is Audio, Emotion, Task before a stable sort by instant, so
//!   equal instants keep that order.

use crate::config::TaskSortKey;
use crate::model::record::{AudioRecord, DomainRecord, EmotionRecord, RecordId, TaskRecord};
use crate::timeline::instant::parse_instant;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Audio,
    Emotion,
    Task,
}

/// One normalized, kind-tagged unit of the timeline feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: RecordId,
    pub kind: EntryKind,
    /// Raw timestamp string the entry is ordered by.
    pub occurred_at: String,
    pub payload: DomainRecord,
}

impl TimelineEntry {
    pub fn from_audio(record: AudioRecord) -> Self {
        Self {
            id: record.id,
            kind: EntryKind::Audio,
            occurred_at: format!("{} {}", record.date, record.time),
            payload: DomainRecord::Audio(record),
        }
    }

    pub fn from_emotion(record: EmotionRecord) -> Self {
        Self {
            id: record.id,
            kind: EntryKind::Emotion,
            occurred_at: format!("{} {}", record.date, record.time),
            payload: DomainRecord::Emotion(record),
        }
    }

    /// Returns `None` for open tasks; only completed tasks reach the timeline.
    pub fn from_task(record: TaskRecord, sort_key: TaskSortKey) -> Option<Self> {
        if !record.completed {
            return None;
        }
        let occurred_at = match (sort_key, record.completed_at.as_ref()) {
            (TaskSortKey::CompletedAt, Some(completed_at)) => completed_at.clone(),
            _ => record.created_at.clone(),
        };
        Some(Self {
            id: record.id,
            kind: EntryKind::Task,
            occurred_at,
            payload: DomainRecord::Task(record),
        })
    }

    /// Parsed ordering instant; `None` when `occurred_at` is not a date-time.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        parse_instant(&self.occurred_at)
    }
}

/// Normalizes, concatenates and orders the three collections.
pub fn merge_entries(
    audio: Vec<AudioRecord>,
    emotions: Vec<EmotionRecord>,
    tasks: Vec<TaskRecord>,
    task_sort_key: TaskSortKey,
) -> Vec<TimelineEntry> {
    let mut keyed: Vec<(Option<NaiveDateTime>, TimelineEntry)> = audio
        .into_iter()
        .map(TimelineEntry::from_audio)
        .chain(emotions.into_iter().map(TimelineEntry::from_emotion))
        .chain(
            tasks
                .into_iter()
                .filter_map(|task| TimelineEntry::from_task(task, task_sort_key)),
        )
        .map(|entry| (entry.instant(), entry))
        .collect();

    // `None < Some(_)`: unparseable timestamps land first, in merge order.
    keyed.sort_by(|left, right| left.0.cmp(&right.0));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}
