// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::path::Path;

use taskledger_model::{Task, TaskId, TaskPatch};
use taskledger_store::{read_table, ConflictPolicy, StoreError, TaskStore};
use tempfile::tempdir;

const FIXTURE: &str = "\
id,title,description,status,due_date
1,Finish report,Complete the quarterly report,pending,2025-10-20
2,Team meeting,,done,2025-10-18
3,Update website,Add new product info,pending,
4,Client follow-up,Call client about feedback,done,2025-10-19
5,Plan workshop,,pending,2025-10-25
6,Code review,Review PR #42,pending,
7,Write blog post,Introduction to Rust,done,2025-10-28
";

fn seed(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("tasks.csv");
    std::fs::write(&path, FIXTURE).expect("seed fixture");
    path
}

fn row_set(path: &Path) -> BTreeSet<String> {
    std::fs::read_to_string(path)
        .expect("read csv")
        .lines()
        .skip(1)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn task(id: u64, title: &str, description: &str, status: &str, due_date: &str) -> Task {
    Task::new(
        TaskId::new(id),
        title.to_string(),
        description.to_string(),
        status.to_string(),
        if due_date.is_empty() {
            None
        } else {
            Some(due_date.to_string())
        },
    )
}

#[test]
fn load_keys_every_row_by_integer_id() {
    let dir = tempdir().expect("tempdir");
    let store = TaskStore::load(seed(dir.path())).expect("load fixture");
    assert_eq!(store.get_all().len(), 7);
    for id in 1..=7 {
        let found = store.get(TaskId::new(id)).expect("row present");
        assert_eq!(found.id, TaskId::new(id));
    }
    assert!(store.get(TaskId::new(8)).is_none());
}

#[test]
fn load_fails_fatally_when_file_is_missing() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nope.csv");
    let err = TaskStore::load(&path).expect_err("missing file");
    assert_eq!(err, StoreError::FileMissing(path));
}

#[test]
fn get_returns_the_exact_stored_record() {
    let dir = tempdir().expect("tempdir");
    let store = TaskStore::load(seed(dir.path())).expect("load fixture");
    assert_eq!(
        store.get(TaskId::new(6)),
        Some(&task(6, "Code review", "Review PR #42", "pending", ""))
    );
}

#[test]
fn create_with_fresh_id_grows_table_and_file_by_one() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");
    let before = row_set(&path);

    let created = store
        .create(
            task(8, "Deploy app", "Deploy the latest version to production", "pending", "2025-10-30"),
            ConflictPolicy::Reject,
        )
        .expect("create");
    assert_eq!(created.id, TaskId::new(8));
    assert_eq!(store.get_all().len(), 8);

    let after = row_set(&path);
    let mut expected = before;
    expected.insert("8,Deploy app,Deploy the latest version to production,pending,2025-10-30".to_string());
    assert_eq!(after, expected);
}

#[test]
fn create_with_duplicate_id_signals_conflict_and_changes_nothing() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");
    let before_rows = row_set(&path);
    let before_table: Vec<Task> = store.get_all().to_vec();

    let err = store
        .create(task(2, "Shadow", "", "pending", ""), ConflictPolicy::Reject)
        .expect_err("duplicate id");
    assert_eq!(err, StoreError::Conflict(TaskId::new(2)));
    assert_eq!(store.get_all(), before_table.as_slice());
    assert_eq!(row_set(&path), before_rows);
}

#[test]
fn create_with_overwrite_policy_replaces_in_place() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");

    store
        .create(task(2, "Rescheduled meeting", "", "pending", "2025-10-21"), ConflictPolicy::Overwrite)
        .expect("overwrite create");
    assert_eq!(store.get_all().len(), 7);
    let ids: Vec<u64> = store.get_all().iter().map(|t| t.id.value()).collect();
    assert_eq!(ids, [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(
        store.get(TaskId::new(2)).map(|t| t.title.as_str()),
        Some("Rescheduled meeting")
    );
}

#[test]
fn patch_changes_only_the_named_fields() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");

    let patched = store
        .patch(
            TaskId::new(2),
            &TaskPatch {
                status: Some("pending".to_string()),
                ..TaskPatch::default()
            },
        )
        .expect("patch");
    assert_eq!(patched.title, "Team meeting");
    assert_eq!(patched.status, "pending");
    assert_eq!(patched.due_date.as_deref(), Some("2025-10-18"));
    assert_eq!(patched.description, "");

    let reloaded = read_table(&path).expect("reload");
    assert_eq!(
        reloaded.get(TaskId::new(2)),
        Some(&task(2, "Team meeting", "", "pending", "2025-10-18"))
    );
}

#[test]
fn patch_on_missing_id_never_creates() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");

    let missing = TaskId::new(99);
    let err = store
        .patch(missing, &TaskPatch { title: Some("ghost".to_string()), ..TaskPatch::default() })
        .expect_err("missing id");
    assert_eq!(err, StoreError::TaskMissing(missing));
    assert_eq!(store.get_all().len(), 7);
}

#[test]
fn replace_overwrites_the_full_record() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");

    let replacement = task(3, "Relaunch website", "Ship the redesign", "done", "2025-11-01");
    store.replace(TaskId::new(3), replacement.clone()).expect("replace");
    assert_eq!(store.get(TaskId::new(3)), Some(&replacement));
    let reloaded = read_table(&path).expect("reload");
    assert_eq!(reloaded.get(TaskId::new(3)), Some(&replacement));
}

#[test]
fn delete_removes_exactly_one_entry() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let mut store = TaskStore::load(&path).expect("load fixture");
    let before = row_set(&path);

    let removed = store.delete(TaskId::new(4)).expect("delete");
    assert_eq!(removed.id, TaskId::new(4));
    assert_eq!(store.get_all().len(), 6);

    let mut expected = before;
    assert!(expected.remove("4,Client follow-up,Call client about feedback,done,2025-10-19"));
    assert_eq!(row_set(&path), expected);

    let err = store.delete(TaskId::new(4)).expect_err("already gone");
    assert_eq!(err, StoreError::TaskMissing(TaskId::new(4)));
}

#[test]
fn failed_rewrite_leaves_table_ahead_of_file() {
    let dir = tempdir().expect("tempdir");
    let path = seed(dir.path());
    let store = TaskStore::load(&path).expect("load fixture");

    // Point the mirror at a directory so the rewrite must fail.
    let blocked = dir.path().join("blocked");
    std::fs::create_dir(&blocked).expect("mkdir");
    let mut store = TaskStore::with_table(&blocked, store.table().clone());

    let err = store
        .create(task(8, "Deploy app", "", "pending", ""), ConflictPolicy::Reject)
        .expect_err("rewrite must fail");
    assert!(matches!(err, StoreError::Storage(_)));
    // The mutation already applied; the inconsistency window is observable.
    assert!(store.get(TaskId::new(8)).is_some());
    assert_eq!(store.get_all().len(), 8);
}
