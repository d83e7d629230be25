//! Task list use-cases.
//!
//! # Invariants
//! - Completing a task stamps `completedAt`; re-opening clears it.
//! - New tasks are prepended to the stored array.

use crate::model::record::{next_record_id, RecordId, TaskRecord};
use crate::model::stamp::{date_time_stamp, epoch_millis};
use crate::service::collection::{load_collection, require_text, save_collection};
use crate::service::{ServiceError, ServiceResult};
use crate::store::{RecordSource, RecordStore};
use chrono::{DateTime, Local};
use log::info;

const SOURCE: RecordSource = RecordSource::Tasks;

/// Producer owning the `tasks` key.
pub struct TaskService<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns stored tasks, newest first.
    pub async fn list_tasks(&self) -> ServiceResult<Vec<TaskRecord>> {
        load_collection(&self.store, SOURCE).await
    }

    /// Adds an open task stamped with the local clock.
    pub async fn add_task(&self, text: impl Into<String>) -> ServiceResult<TaskRecord> {
        self.add_task_at(text, Local::now()).await
    }

    /// Adds an open task stamped with `now`.
    pub async fn add_task_at(
        &self,
        text: impl Into<String>,
        now: DateTime<Local>,
    ) -> ServiceResult<TaskRecord> {
        let text = text.into();
        require_text(&text, "task text cannot be empty")?;

        let mut tasks: Vec<TaskRecord> = self.list_tasks().await?;
        let task = TaskRecord {
            id: next_record_id(epoch_millis(now), tasks.iter().map(|task| task.id)),
            text,
            completed: false,
            created_at: date_time_stamp(now),
            completed_at: None,
        };
        tasks.insert(0, task.clone());
        save_collection(&self.store, SOURCE, &tasks).await?;

        info!(
            "event=task_add module=service status=ok id={} count={}",
            task.id,
            tasks.len()
        );
        Ok(task)
    }

    /// Flips completion of task `id` using the local clock.
    pub async fn toggle_task(&self, id: RecordId) -> ServiceResult<TaskRecord> {
        self.toggle_task_at(id, Local::now()).await
    }

    /// Flips completion of task `id`, stamping `now` when it becomes done.
    pub async fn toggle_task_at(&self, id: RecordId, now: DateTime<Local>) -> ServiceResult<TaskRecord> {
        let mut tasks: Vec<TaskRecord> = self.list_tasks().await?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ServiceError::NotFound { source: SOURCE, id })?;
        task.toggle(date_time_stamp(now));
        let toggled = task.clone();
        save_collection(&self.store, SOURCE, &tasks).await?;

        info!(
            "event=task_toggle module=service status=ok id={} completed={}",
            id, toggled.completed
        );
        Ok(toggled)
    }

    pub async fn delete_task(&self, id: RecordId) -> ServiceResult<()> {
        let mut tasks: Vec<TaskRecord> = self.list_tasks().await?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(ServiceError::NotFound { source: SOURCE, id });
        }
        save_collection(&self.store, SOURCE, &tasks).await?;

        info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }
}
