#![forbid(unsafe_code)]
//! CSV-backed task store.
//!
//! The in-memory table is the single source of truth while the process runs;
//! the CSV file is its durable mirror, rewritten in full after every mutation.
//! Mutations apply to the table first and then rewrite the file, so a failed
//! rewrite leaves the table ahead of the file. That window is part of the
//! store's contract and is surfaced, not rolled back.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use taskledger_model::{Task, TaskId, TaskPatch};
use tracing::{info, warn};

mod csv_file;
mod memory;
mod table;

pub use csv_file::{append_task, read_table, write_table, CSV_HEADER};
pub use memory::{RegistryError, UserRegistry};
pub use table::TaskTable;

pub const CRATE_NAME: &str = "taskledger-store";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The CSV file does not exist. Fatal at load time.
    FileMissing(PathBuf),
    /// No task under the given id.
    TaskMissing(TaskId),
    /// A task with the given id already exists.
    Conflict(TaskId),
    /// Any other I/O or parse failure.
    Storage(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileMissing(path) => write!(f, "csv file not found: {}", path.display()),
            Self::TaskMissing(id) => write!(f, "task {id} not found"),
            Self::Conflict(id) => write!(f, "task {id} already exists"),
            Self::Storage(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// What `create` does when the id is already present. The HTTP boundary
/// checks for duplicates itself and uses `Reject`; `Overwrite` gives plain
/// upsert semantics instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    Reject,
    Overwrite,
}

/// Id-keyed task table plus the path of its CSV mirror.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    table: TaskTable,
}

impl TaskStore {
    /// Reads the CSV file at `path` into an id-keyed table.
    ///
    /// Fails with [`StoreError::FileMissing`] when the file does not exist and
    /// [`StoreError::Storage`] on any other read or parse failure; the service
    /// cannot start without its ledger.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let table = csv_file::read_table(&path)?;
        info!(path = %path.display(), tasks = table.len(), "task ledger loaded");
        Ok(Self { path, table })
    }

    /// A store over an already-built table, writing through to `path`. The
    /// file is created by the first mutation.
    #[must_use]
    pub fn with_table(path: impl Into<PathBuf>, table: TaskTable) -> Self {
        Self {
            path: path.into(),
            table,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn table(&self) -> &TaskTable {
        &self.table
    }

    /// All tasks in insertion order as stored.
    #[must_use]
    pub fn get_all(&self) -> &[Task] {
        self.table.as_slice()
    }

    /// The task under `id`, if any. A miss is not an error; the caller
    /// decides how to surface it.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.table.get(id)
    }

    /// Inserts `task` under its own id and rewrites the file.
    ///
    /// With [`ConflictPolicy::Reject`] an occupied id fails with
    /// [`StoreError::Conflict`] and the table is left untouched.
    pub fn create(&mut self, task: Task, policy: ConflictPolicy) -> Result<Task, StoreError> {
        if policy == ConflictPolicy::Reject && self.table.contains(task.id) {
            return Err(StoreError::Conflict(task.id));
        }
        let stored = task.clone();
        self.table.upsert(task);
        self.persist()?;
        Ok(stored)
    }

    /// Unconditionally overwrites the entry at `id` with `task` and rewrites
    /// the file. The caller must have verified that `id` exists and that
    /// `task.id == id`; this operation does not check either.
    pub fn replace(&mut self, id: TaskId, task: Task) -> Result<Task, StoreError> {
        let stored = task.clone();
        self.table.set(id, task);
        self.persist()?;
        Ok(stored)
    }

    /// Merges the fields present in `patch` into the entry at `id`, then
    /// rewrites the file. Fails with [`StoreError::TaskMissing`] when the id
    /// is absent; a patch never creates an entry.
    pub fn patch(&mut self, id: TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        let task = self
            .table
            .get_mut(id)
            .ok_or(StoreError::TaskMissing(id))?;
        task.apply_patch(patch);
        let stored = task.clone();
        self.persist()?;
        Ok(stored)
    }

    /// Removes the entry at `id`, then rewrites the file. Fails with
    /// [`StoreError::TaskMissing`] when the id is absent.
    pub fn delete(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let removed = self
            .table
            .remove(id)
            .ok_or(StoreError::TaskMissing(id))?;
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Err(err) = csv_file::write_table(&self.path, &self.table) {
            warn!(path = %self.path.display(), error = %err, "csv rewrite failed; table is ahead of the file");
            return Err(err);
        }
        Ok(())
    }
}
