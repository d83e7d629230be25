//! Core domain logic for Equilibre.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod timeline;

pub use config::{AppConfig, ConfigError, TaskSortKey, TimelineConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::emotion::{find_emotion, Emotion, EMOTIONS};
pub use model::record::{AudioRecord, DomainRecord, EmotionRecord, RecordId, TaskRecord};
pub use service::audio_service::AudioNoteService;
pub use service::diary_service::DiaryService;
pub use service::task_service::TaskService;
pub use service::{erase_all_data, ServiceError, ServiceResult};
pub use store::{
    MemoryRecordStore, RecordSource, RecordStore, SqliteRecordStore, StoreError, StoreResult,
};
pub use timeline::{
    describe, merge_entries, parse_instant, start_polling, EntryKind, PollingHandle,
    RefreshReport, RenderDescription, RenderIcon, SourceReport, SourceStatus, TimelineAggregator,
    TimelineEntry, TimelineFeed, TimelineSnapshot,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
