// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::ParseError;

/// Status assigned when a create request carries none.
pub const DEFAULT_STATUS: &str = "pending";

/// Integer task key. Stored as decimal text in the CSV file and parsed back
/// on load; serialized as a plain number everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("task id"));
        }
        input
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseError::NotNumeric("task id"))
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ledger row. Field order matches the CSV column order
/// `id, title, description, status, due_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    #[must_use]
    pub fn new(
        id: TaskId,
        title: String,
        description: String,
        status: String,
        due_date: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            due_date: normalize_due_date(due_date),
        }
    }

    /// Merges the fields present in `patch` into this task. Absent fields are
    /// left untouched; the id never changes.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(due_date) = &patch.due_date {
            self.due_date = normalize_due_date(Some(due_date.clone()));
        }
    }
}

/// Partial update. A `None` field means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}

/// An empty due date and a missing one are the same state; both serialize to
/// the empty CSV field.
#[must_use]
pub fn normalize_due_date(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}
