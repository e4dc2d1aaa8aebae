// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use taskledger_model::{TaskId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    TaskNotFound,
    UserNotFound,
    DuplicateId,
    IdMismatch,
    ValidationFailed,
    Storage,
    Internal,
}

/// Machine-readable error envelope; every non-2xx body carries one under the
/// `error` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn task_not_found(id: TaskId) -> Self {
        Self::new(
            ApiErrorCode::TaskNotFound,
            format!("task {id} not found"),
            json!({"task_id": id}),
        )
    }

    #[must_use]
    pub fn user_not_found(id: UserId) -> Self {
        Self::new(
            ApiErrorCode::UserNotFound,
            format!("user {id} not found"),
            json!({"user_id": id}),
        )
    }

    #[must_use]
    pub fn duplicate_id(id: u64) -> Self {
        Self::new(
            ApiErrorCode::DuplicateId,
            format!("id {id} already exists"),
            json!({"id": id}),
        )
    }

    #[must_use]
    pub fn id_mismatch(path_id: u64, body_id: u64) -> Self {
        Self::new(
            ApiErrorCode::IdMismatch,
            "id in path and body must match",
            json!({"path_id": path_id, "body_id": body_id}),
        )
    }

    #[must_use]
    pub fn invalid_path_id(raw: &str, reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            format!("invalid id in path: {reason}"),
            json!({"value": raw}),
        )
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Storage, message, json!({}))
    }
}
