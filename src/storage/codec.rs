//! CSV encoding of typed rows.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::StorageError;

/// Decode all rows of a CSV file; header and field whitespace is trimmed.
pub(crate) fn decode_rows<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<Vec<T>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    reader
        .deserialize()
        .map(|row| row.map_err(|e| StorageError::corrupt(path, e)))
        .collect()
}

/// Decode the rows that parse and count the ones that do not.
pub(crate) fn decode_rows_lenient<T: DeserializeOwned>(
    path: &Path,
    bytes: &[u8],
) -> Result<(Vec<T>, usize), StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| StorageError::corrupt(path, e))?
        .clone();

    let mut rows = Vec::new();
    let mut skipped = 0;
    for record in reader.records() {
        match record.and_then(|record| record.deserialize(Some(&headers))) {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable row");
                skipped += 1;
            }
        }
    }
    Ok((rows, skipped))
}

/// Encode rows with an explicit header, so an empty table still has one.
pub(crate) fn encode_rows<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
) -> Result<Vec<u8>, StorageError> {
    let mut bytes = encode_records(path, &[columns])?;
    bytes.extend(encode_records(path, rows)?);
    Ok(bytes)
}

/// Encode rows without a header, for appending to an existing table.
pub(crate) fn encode_records<T: Serialize>(path: &Path, rows: &[T]) -> Result<Vec<u8>, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| StorageError::corrupt(path, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| StorageError::io(path, e.into_error()))
}
