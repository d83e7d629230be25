//! Shared load/save helpers for JSON-array collections.

use crate::model::record::RecordId;
use crate::store::{RecordSource, RecordStore, StoreError};
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error for producer use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// User input rejected before touching the store.
    InvalidInput(&'static str),
    /// Target record does not exist in its collection.
    NotFound { source: RecordSource, id: RecordId },
    /// Stored payload could not be decoded; left untouched.
    Decode {
        source: RecordSource,
        error: serde_json::Error,
    },
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound { source, id } => write!(f, "record {id} not found in `{source}`"),
            Self::Decode { source, error } => {
                write!(f, "stored `{source}` payload is malformed: {error}")
            }
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { error, .. } => Some(error),
            Self::Encode(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidInput(_) | Self::NotFound { .. } => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Reads one collection; an absent key is an empty collection.
pub(crate) async fn load_collection<S, T>(store: &S, source: RecordSource) -> ServiceResult<Vec<T>>
where
    S: RecordStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(source.key()).await? {
        Some(raw) => {
            serde_json::from_str(&raw).map_err(|error| ServiceError::Decode { source, error })
        }
        None => Ok(Vec::new()),
    }
}

/// Overwrites one collection with `records`.
pub(crate) async fn save_collection<S, T>(
    store: &S,
    source: RecordSource,
    records: &[T],
) -> ServiceResult<()>
where
    S: RecordStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(records).map_err(ServiceError::Encode)?;
    store.set(source.key(), &raw).await?;
    Ok(())
}

/// Removes every collection; backs the CLI `erase` command.
pub async fn erase_all_data<S>(store: &S) -> ServiceResult<()>
where
    S: RecordStore + ?Sized,
{
    for source in RecordSource::ALL {
        store.remove(source.key()).await?;
    }
    info!("event=erase_all module=service status=ok");
    Ok(())
}

pub(crate) fn require_text(value: &str, message: &'static str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(message));
    }
    Ok(())
}
