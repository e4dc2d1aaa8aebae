// SPDX-License-Identifier: Apache-2.0

use taskledger_model::{Task, TaskId};

/// Insertion-ordered, id-keyed task rows. The table stays small by
/// construction, so lookups are linear scans over the row vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    rows: Vec<Task>,
}

impl TaskTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from parsed rows. A repeated id keeps the first row's
    /// position and the last row's fields, matching dict-insertion semantics.
    #[must_use]
    pub fn from_rows(rows: Vec<Task>) -> Self {
        let mut table = Self::new();
        for task in rows {
            table.upsert(task);
        }
        table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.rows.iter()
    }

    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.position(id).map(|index| &self.rows[index])
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.position(id).map(move |index| &mut self.rows[index])
    }

    /// Insert-or-replace keyed by `task.id`, keeping the existing position on
    /// replacement.
    pub fn upsert(&mut self, task: Task) {
        match self.position(task.id) {
            Some(index) => self.rows[index] = task,
            None => self.rows.push(task),
        }
    }

    /// Overwrites the row at `id` with `task`, or appends when `id` is
    /// absent. Keyed by the `id` argument, not by `task.id`.
    pub fn set(&mut self, id: TaskId, task: Task) {
        match self.position(id) {
            Some(index) => self.rows[index] = task,
            None => self.rows.push(task),
        }
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.position(id).map(|index| self.rows.remove(index))
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.rows.iter().position(|task| task.id == id)
    }
}

impl<'a> IntoIterator for &'a TaskTable {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, title: &str) -> Task {
        Task::new(
            TaskId::new(id),
            title.to_string(),
            String::new(),
            "pending".to_string(),
            None,
        )
    }

    #[test]
    fn upsert_keeps_position_on_replacement() {
        let mut table = TaskTable::from_rows(vec![task(1, "a"), task(2, "b"), task(3, "c")]);
        table.upsert(task(2, "b2"));
        let titles: Vec<&str> = table.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["a", "b2", "c"]);
    }

    #[test]
    fn duplicate_load_rows_collapse_last_wins() {
        let table = TaskTable::from_rows(vec![task(1, "first"), task(1, "second")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(TaskId::new(1)).map(|t| t.title.as_str()), Some("second"));
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut table = TaskTable::from_rows(vec![task(1, "a"), task(2, "b"), task(3, "c")]);
        let removed = table.remove(TaskId::new(2)).expect("present");
        assert_eq!(removed.title, "b");
        let ids: Vec<u64> = table.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, [1, 3]);
        assert!(table.remove(TaskId::new(2)).is_none());
    }
}
