// SPDX-License-Identifier: Apache-2.0

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use taskledger_model::Task;

use crate::{StoreError, TaskTable};

/// Fixed column order of the ledger file.
pub const CSV_HEADER: [&str; 5] = ["id", "title", "description", "status", "due_date"];

/// Reads the whole file into a table. The header must match [`CSV_HEADER`]
/// exactly, column order included.
pub fn read_table(path: &Path) -> Result<TaskTable, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(StoreError::FileMissing(path.to_path_buf()));
        }
        Err(err) => return Err(StoreError::Storage(format!("csv open failed: {err}"))),
    };
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader
        .headers()
        .map_err(|err| StoreError::Storage(format!("csv header read failed: {err}")))?;
    let expected: csv::StringRecord = CSV_HEADER.iter().collect();
    if *headers != expected {
        return Err(StoreError::Storage(format!(
            "unexpected csv header: got [{}], want [{}]",
            headers.iter().collect::<Vec<_>>().join(","),
            CSV_HEADER.join(",")
        )));
    }
    let mut rows = Vec::new();
    for record in reader.deserialize::<Task>() {
        let task = record.map_err(|err| StoreError::Storage(format!("csv row parse failed: {err}")))?;
        rows.push(task);
    }
    Ok(TaskTable::from_rows(rows))
}

/// Serializes every entry of `table` to `path`: header first, one row per
/// entry, full overwrite. Row order follows the table's insertion order,
/// though only set equality is guaranteed to callers.
pub fn write_table(path: &Path, table: &TaskTable) -> Result<(), StoreError> {
    let file =
        File::create(path).map_err(|err| StoreError::Storage(format!("csv create failed: {err}")))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .write_record(CSV_HEADER)
        .map_err(|err| StoreError::Storage(format!("csv header write failed: {err}")))?;
    for task in table {
        writer
            .serialize(task)
            .map_err(|err| StoreError::Storage(format!("csv row write failed: {err}")))?;
    }
    writer
        .flush()
        .map_err(|err| StoreError::Storage(format!("csv flush failed: {err}")))
}

/// Appends a single row without touching the rest of the file. Not part of
/// the store's persistence path; the canonical path rewrites the whole file.
pub fn append_task(path: &Path, task: &Task) -> Result<(), StoreError> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|err| StoreError::Storage(format!("csv append open failed: {err}")))?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .serialize(task)
        .map_err(|err| StoreError::Storage(format!("csv append failed: {err}")))?;
    writer
        .flush()
        .map_err(|err| StoreError::Storage(format!("csv flush failed: {err}")))
}
