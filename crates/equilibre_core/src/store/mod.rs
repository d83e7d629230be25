//! Record store abstraction over the platform key-value store.
//!
//! # Responsibility
//! - Define the async `get`/`set`/`remove` contract used by producers and
//!   the timeline aggregator.
//! - Name the three fixed collection keys.
//!
//! # Invariants
//! - Values are serialized JSON arrays written by full overwrite.
//! - An absent key is not an error; callers decide how to treat it.

use crate::db::DbError;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a record store backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Backend lock was poisoned by a panicking writer.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Poisoned => write!(f, "record store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Poisoned => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The three collections persisted by the app, one key each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSource {
    AudioNotes,
    Diary,
    Tasks,
}

impl RecordSource {
    /// All sources in timeline concatenation order.
    pub const ALL: [RecordSource; 3] = [Self::AudioNotes, Self::Diary, Self::Tasks];

    /// Store key owned by this source.
    pub fn key(self) -> &'static str {
        match self {
            Self::AudioNotes => "audioNotes",
            Self::Diary => "diario",
            Self::Tasks => "tasks",
        }
    }
}

impl Display for RecordSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Asynchronous string key-value store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key).await
    }
}
