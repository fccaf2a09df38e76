//! Tabular I/O adapter: the export and import operations
//!
//! The explicit-handle form ([`import_tabular`]) is the primary import entry
//! point. [`import_selected`] resolves a file from a [`FileSelector`] and
//! delegates to it.

use crate::error::{TabularError, TabularResult};
use crate::excel::{ExportOptions, ImportOptions, TabularExporter, TabularImporter};
use crate::source::{FileHandle, FileSelector};
use crate::types::{Record, TabularDocument};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Save `records` as `<file_name>.xlsx` in the current directory with a
/// single "Sheet1" worksheet. Returns the path written.
pub fn export_tabular(records: &[Record], file_name: &str) -> TabularResult<PathBuf> {
    export_tabular_with(records, file_name, &ExportOptions::default())
}

pub fn export_tabular_with(
    records: &[Record],
    file_name: &str,
    options: &ExportOptions,
) -> TabularResult<PathBuf> {
    TabularExporter::new(options.clone()).export(records, file_name)
}

/// Export typed items. Each item must serialize to a flat object.
pub fn export_serializable<T: Serialize>(items: &[T], file_name: &str) -> TabularResult<PathBuf> {
    let records = records_from_serializable(items)?;
    export_tabular(&records, file_name)
}

pub fn records_from_serializable<T: Serialize>(items: &[T]) -> TabularResult<TabularDocument> {
    items.iter().map(Record::from_serializable).collect()
}

/// Import the first sheet of `source`, using its first row as field names.
/// Fails with [`TabularError::NoFileProvided`] when no handle is given.
pub async fn import_tabular(source: Option<&FileHandle>) -> TabularResult<TabularDocument> {
    import_tabular_with(source, &ImportOptions::default()).await
}

pub async fn import_tabular_with(
    source: Option<&FileHandle>,
    options: &ImportOptions,
) -> TabularResult<TabularDocument> {
    let file = source.ok_or(TabularError::NoFileProvided)?;
    debug!(file = file.name(), "importing");

    let bytes = file.read_bytes().await?;
    TabularImporter::new(options.clone()).import_bytes(&bytes)
}

/// Import whatever file the selector currently holds.
/// Fails with [`TabularError::NoFileSelected`] when it holds none.
pub async fn import_selected<S>(selector: &S) -> TabularResult<TabularDocument>
where
    S: FileSelector + ?Sized,
{
    let file = selector
        .selected_file()
        .ok_or(TabularError::NoFileSelected)?;
    import_tabular(Some(&file)).await
}

/// Import and map every record into `T`
pub async fn import_deserialized<T: DeserializeOwned>(
    source: Option<&FileHandle>,
) -> TabularResult<Vec<T>> {
    let records = import_tabular(source).await?;
    records.iter().map(Record::deserialize_into).collect()
}
