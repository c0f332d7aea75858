//! Scheduled-task persistence.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ferry_core::ScheduledTask;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};

/// Storage for scheduled tasks consumed by an external scheduler.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Persist a new task.
    async fn add_scheduled_task(&self, task: ScheduledTask) -> ScheduleResult<()>;

    /// All tasks in registration order.
    async fn list(&self) -> ScheduleResult<Vec<ScheduledTask>>;

    /// Remove a task by identifier, returning it.
    async fn remove(&self, id: Uuid) -> ScheduleResult<ScheduledTask>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScheduleFile {
    tasks: Vec<ScheduledTask>,
}

/// JSON file store. The file is re-read on every operation so separate
/// processes observe each other's changes.
#[derive(Debug)]
pub struct FileScheduleStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileScheduleStore {
    /// Store backed by the file at `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> ScheduleResult<ScheduleFile> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(ScheduleFile::default());
            }
            Err(source) => return Err(self.io_error("schedule.read", source)),
        };
        if content.trim().is_empty() {
            return Ok(ScheduleFile::default());
        }
        serde_json::from_str(&content).map_err(|source| ScheduleError::Json {
            operation: "schedule.decode",
            path: self.path.clone(),
            source,
        })
    }

    async fn persist(&self, file: &ScheduleFile) -> ScheduleResult<()> {
        let content = serde_json::to_string_pretty(file).map_err(|source| ScheduleError::Json {
            operation: "schedule.encode",
            path: self.path.clone(),
            source,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error("schedule.create_dir", source))?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, content)
            .await
            .map_err(|source| self.io_error("schedule.write", source))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|source| self.io_error("schedule.rename", source))
    }

    fn io_error(&self, operation: &'static str, source: io::Error) -> ScheduleError {
        ScheduleError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl ScheduleStore for FileScheduleStore {
    async fn add_scheduled_task(&self, task: ScheduledTask) -> ScheduleResult<()> {
        let _guard = self.guard.lock().await;
        let mut file = self.load().await?;
        file.tasks.push(task);
        self.persist(&file).await
    }

    async fn list(&self) -> ScheduleResult<Vec<ScheduledTask>> {
        let _guard = self.guard.lock().await;
        Ok(self.load().await?.tasks)
    }

    async fn remove(&self, id: Uuid) -> ScheduleResult<ScheduledTask> {
        let _guard = self.guard.lock().await;
        let mut file = self.load().await?;
        let index = file
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ScheduleError::NotFound { id })?;
        let removed = file.tasks.remove(index);
        self.persist(&file).await?;
        Ok(removed)
    }
}

/// In-process store, used when no schedule file is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryScheduleStore {
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl MemoryScheduleStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for MemoryScheduleStore {
    async fn add_scheduled_task(&self, task: ScheduledTask) -> ScheduleResult<()> {
        self.tasks.lock().await.push(task);
        Ok(())
    }

    async fn list(&self) -> ScheduleResult<Vec<ScheduledTask>> {
        Ok(self.tasks.lock().await.clone())
    }

    async fn remove(&self, id: Uuid) -> ScheduleResult<ScheduledTask> {
        let mut tasks = self.tasks.lock().await;
        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(ScheduleError::NotFound { id })?;
        Ok(tasks.remove(index))
    }
}
