// SPDX-License-Identifier: Apache-2.0

use serde_json::json;

use taskledger_model::{Task, TaskId, TaskPatch, User, UserId, UserPatch, DEFAULT_STATUS};
use taskledger_store::{RegistryError, StoreError};

use crate::dto::{CreateTaskDto, CreateUserDto, PatchTaskDto, PatchUserDto, TaskDto, UserDto};
use crate::{ApiError, ApiErrorCode};

impl CreateTaskDto {
    #[must_use]
    pub fn into_task(self) -> Task {
        Task::new(
            TaskId::new(self.id),
            self.title,
            self.description,
            self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            self.due_date,
        )
    }
}

impl PatchTaskDto {
    #[must_use]
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
        }
    }
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.value(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
            due_date: task.due_date.clone(),
        }
    }
}

impl CreateUserDto {
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: UserId::new(self.id),
            name: self.name,
            age: self.age,
        }
    }
}

impl PatchUserDto {
    #[must_use]
    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            name: self.name,
            age: self.age,
        }
    }
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            name: user.name.clone(),
            age: user.age,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TaskMissing(id) => Self::task_not_found(id),
            StoreError::Conflict(id) => Self::duplicate_id(id.value()),
            StoreError::FileMissing(path) => Self::new(
                ApiErrorCode::Storage,
                "task ledger file is missing",
                json!({"path": path.display().to_string()}),
            ),
            StoreError::Storage(msg) => Self::storage(msg),
            _ => Self::new(ApiErrorCode::Internal, err.to_string(), json!({})),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UserMissing(id) => Self::user_not_found(id),
            RegistryError::Conflict(id) => Self::duplicate_id(id.value()),
            _ => Self::new(ApiErrorCode::Internal, err.to_string(), json!({})),
        }
    }
}
