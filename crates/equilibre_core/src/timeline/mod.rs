//! Timeline aggregation and merge engine.
//!
//! # Responsibility
//! - Read the three record collections, normalize them into one entry shape,
//!   merge and order them by instant.
//! - Publish the ordered feed only when it changed, and keep it fresh on a
//!   fixed polling interval.
//! - Describe each entry for rendering without depending on a UI toolkit.
//!
//! # Invariants
//! - The aggregator is read-only towards the record store.
//! - Incomplete tasks never produce an entry.
//! - Entries with unparseable timestamps are kept and sorted first.
//! - `refresh()` never fails; broken sources degrade to empty.

pub mod aggregator;
pub mod entry;
pub mod instant;
pub mod poller;
pub mod render;
mod source;

pub use aggregator::{RefreshReport, TimelineAggregator, TimelineFeed, TimelineSnapshot};
pub use entry::{merge_entries, EntryKind, TimelineEntry};
pub use instant::parse_instant;
pub use poller::{start_polling, PollingHandle};
pub use render::{describe, RenderDescription, RenderIcon};
pub use source::{SourceReport, SourceStatus};
