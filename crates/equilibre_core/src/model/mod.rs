//! Domain model for the three wellbeing record collections.
//!
//! # Responsibility
//! - Define the persisted record shapes owned by each producer.
//! - Keep serialized field names identical to the stored JSON layout.
//!
//! # Invariants
//! - Record IDs are unique only within their own collection.
//! - Records are persisted by full-array overwrite, never patched in place.

pub mod emotion;
pub mod record;
pub mod stamp;
