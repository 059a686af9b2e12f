// 💾 JSON Store - whole-file persistence for record collections
//
// One JSON array per file. Saving rewrites the file in a single write (no
// temp file + rename). Loading reads and parses the whole document before any
// element is decoded, and decodes each element on its own so one bad element
// only costs that element.

use crate::error::{RecordError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// LOAD REPORT
// ============================================================================

/// Outcome of reading a collection file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    /// Elements that decoded into a known variant, in file order
    pub records: Vec<T>,

    /// Elements dropped because their `tipo`/shape was not recognized
    pub skipped: usize,
}

impl<T> LoadReport<T> {
    pub fn loaded(&self) -> usize {
        self.records.len()
    }
}

// ============================================================================
// SAVE / LOAD
// ============================================================================

/// Serialize `records` as a JSON array and write it to `path`.
pub fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| RecordError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), count = records.len(), "collection saved");
    Ok(())
}

/// Load a JSON array, decoding each element with serde.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<LoadReport<T>> {
    load_records_with(path, serde_json::from_value)
}

/// Load a JSON array, decoding each element with `decode`.
///
/// Fails with `Io`/`Malformed` only when the file itself cannot be read or is
/// not a JSON array. Elements that `decode` rejects are skipped and counted.
pub fn load_records_with<T, F>(path: &Path, decode: F) -> Result<LoadReport<T>>
where
    F: Fn(Value) -> std::result::Result<T, serde_json::Error>,
{
    let content = fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let elements: Vec<Value> =
        serde_json::from_str(&content).map_err(|source| RecordError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = 0;

    for (idx, element) in elements.into_iter().enumerate() {
        match decode(element) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!(path = %path.display(), index = idx, error = %e, "skipping unrecognized record");
            }
        }
    }

    info!(
        path = %path.display(),
        loaded = records.len(),
        skipped,
        "collection loaded"
    );

    Ok(LoadReport { records, skipped })
}
