//! Per-domain record producers.
//!
//! # Responsibility
//! - Own CRUD for one collection each (audio notes, diary, tasks).
//! - Persist by full-array overwrite of the collection key.
//!
//! # Invariants
//! - A service never reads or writes another service's key.
//! - New records are prepended so stored arrays stay newest-first.

pub mod audio_service;
mod collection;
pub mod diary_service;
pub mod task_service;

pub use collection::{erase_all_data, ServiceError, ServiceResult};
