//! Fail-soft loading of one source collection.

use crate::store::{RecordSource, RecordStore};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of reading one source during a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Payload decoded into this many records.
    Loaded(usize),
    /// Array decoded, but some elements lacked a usable `id` and were skipped.
    Partial { loaded: usize, skipped: usize },
    /// Key absent from the store; same as an empty array.
    Missing,
    /// Payload present but not a valid array of the expected shape.
    Malformed,
    /// Store read failed.
    Unavailable,
}

impl SourceStatus {
    /// Whether the source contributed nothing because of a failure.
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::Malformed | Self::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceReport {
    pub source: RecordSource,
    pub status: SourceStatus,
}

/// Reads and decodes `source`, degrading every failure to an empty list.
///
/// Elements are decoded one by one: a record that cannot be decoded is
/// skipped without discarding its siblings.
pub(crate) async fn load_source<S, T>(store: &S, source: RecordSource) -> (Vec<T>, SourceReport)
where
    S: RecordStore + ?Sized,
    T: DeserializeOwned,
{
    let (records, status) = match store.get(source.key()).await {
        Ok(None) => (Vec::new(), SourceStatus::Missing),
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(elements) => decode_elements(source, elements),
            Err(err) => {
                warn!(
                    "event=timeline_source module=timeline status=degraded source={} reason=malformed error={}",
                    source, err
                );
                (Vec::new(), SourceStatus::Malformed)
            }
        },
        Err(err) => {
            warn!(
                "event=timeline_source module=timeline status=degraded source={} reason=unavailable error={}",
                source, err
            );
            (Vec::new(), SourceStatus::Unavailable)
        }
    };

    (records, SourceReport { source, status })
}

fn decode_elements<T>(source: RecordSource, elements: Vec<Value>) -> (Vec<T>, SourceStatus)
where
    T: DeserializeOwned,
{
    let total = elements.len();
    let records: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(
                    "event=timeline_source module=timeline status=skipped source={} index={} error={}",
                    source, index, err
                );
                None
            }
        })
        .collect();

    let loaded = records.len();
    let status = if loaded == total {
        SourceStatus::Loaded(loaded)
    } else {
        SourceStatus::Partial {
            loaded,
            skipped: total - loaded,
        }
    };
    (records, status)
}
