//! Compilation entries on disk: one `CompilationEntry` per JSONL line.

use crate::model::CompilationEntry;
use compdb_kernel::{JsonlError, read_rows, read_rows_from_path, write_rows_to_path};
use std::io::BufRead;
use std::path::Path;

pub fn read_entries(reader: impl BufRead) -> Result<Vec<CompilationEntry>, JsonlError> {
    read_rows(reader)
}

pub fn read_entries_from_path(
    path: impl AsRef<Path>,
) -> Result<Vec<CompilationEntry>, JsonlError> {
    read_rows_from_path(path)
}

pub fn write_entries_to_path(
    path: impl AsRef<Path>,
    entries: &[CompilationEntry],
) -> Result<(), JsonlError> {
    write_rows_to_path(path, entries)
}
