//! Timeline aggregator: fetch, normalize, merge, detect change, publish.
//!
//! # Invariants
//! - At most one refresh runs per aggregator; later callers queue behind it
//!   and read fresh store state.
//! - The published snapshot is replaced as a whole value, and only when the
//!   newly merged list differs structurally from the current one.
//! - `revision` increases by exactly one per publish.

use crate::config::TimelineConfig;
use crate::model::record::{AudioRecord, EmotionRecord, TaskRecord};
use crate::store::{RecordSource, RecordStore};
use crate::timeline::entry::{merge_entries, TimelineEntry};
use crate::timeline::source::{load_source, SourceReport};
use log::{debug, info};
use std::time::Instant;
use tokio::sync::{watch, Mutex};

/// Published state of the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineSnapshot {
    /// Number of publishes so far; `0` is the initial empty feed.
    pub revision: u64,
    /// Entries ascending by parsed instant.
    pub entries: Vec<TimelineEntry>,
}

/// Diagnostics for one `refresh()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    /// Whether this refresh replaced the published snapshot.
    pub published: bool,
    /// Revision current after this refresh.
    pub revision: u64,
    pub entry_count: usize,
    /// Per-source outcome in `RecordSource::ALL` order.
    pub sources: [SourceReport; 3],
}

/// Single source of truth for the merged timeline.
///
/// Any number of presentation consumers can `subscribe()`; a single poller
/// (see [`crate::timeline::start_polling`]) keeps it fresh.
pub struct TimelineAggregator<S: RecordStore> {
    store: S,
    config: TimelineConfig,
    published: watch::Sender<TimelineSnapshot>,
    refresh_gate: Mutex<()>,
}

impl<S: RecordStore> TimelineAggregator<S> {
    pub fn new(store: S, config: TimelineConfig) -> Self {
        let (published, _) = watch::channel(TimelineSnapshot::default());
        Self {
            store,
            config,
            published,
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Currently published snapshot.
    pub fn current(&self) -> TimelineSnapshot {
        self.published.borrow().clone()
    }

    /// Opens a feed starting at the current snapshot.
    pub fn subscribe(&self) -> TimelineFeed {
        TimelineFeed {
            receiver: self.published.subscribe(),
        }
    }

    /// Re-derives the timeline from the store and publishes it if it changed.
    ///
    /// Never fails: missing keys count as empty collections and broken
    /// sources degrade to empty without affecting the others.
    pub async fn refresh(&self) -> RefreshReport {
        let _gate = self.refresh_gate.lock().await;
        let started_at = Instant::now();

        let (audio, audio_report) =
            load_source::<_, AudioRecord>(&self.store, RecordSource::AudioNotes).await;
        let (emotions, diary_report) =
            load_source::<_, EmotionRecord>(&self.store, RecordSource::Diary).await;
        let (tasks, tasks_report) =
            load_source::<_, TaskRecord>(&self.store, RecordSource::Tasks).await;

        let entries = merge_entries(audio, emotions, tasks, self.config.task_sort_key);
        let entry_count = entries.len();

        let published = self.published.send_if_modified(|snapshot| {
            if snapshot.entries == entries {
                return false;
            }
            snapshot.entries = entries;
            snapshot.revision += 1;
            true
        });
        let revision = self.published.borrow().revision;

        if published {
            info!(
                "event=timeline_publish module=timeline status=ok revision={} entries={} duration_ms={}",
                revision,
                entry_count,
                started_at.elapsed().as_millis()
            );
        } else {
            debug!(
                "event=timeline_refresh module=timeline status=unchanged revision={} entries={} duration_ms={}",
                revision,
                entry_count,
                started_at.elapsed().as_millis()
            );
        }

        RefreshReport {
            published,
            revision,
            entry_count,
            sources: [audio_report, diary_report, tasks_report],
        }
    }
}

/// Consumer view over published snapshots.
///
/// Restartable: every new feed begins at whatever is current.
pub struct TimelineFeed {
    receiver: watch::Receiver<TimelineSnapshot>,
}

impl TimelineFeed {
    /// Returns the current snapshot and marks it as seen.
    pub fn current(&mut self) -> TimelineSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a publish happened since the last seen snapshot.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Waits for the next publish; `None` once the aggregator is dropped.
    pub async fn changed(&mut self) -> Option<TimelineSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
