//! JSONL reading and atomic file operations

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Failure to read a line-delimited JSON file
#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("failed to read session log: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read every record from a JSONL file, failing on the first malformed line.
///
/// Blank lines are malformed too. Line numbers in errors are 1-based.
pub fn read_jsonl_strict(path: &Path) -> Result<Vec<Value>, JsonlError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let record = serde_json::from_str(&line).map_err(|source| JsonlError::Json {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Write data atomically using temp file + rename.
///
/// The temp file name carries the process id so concurrent writers of the
/// same target never share a temp file; the last rename wins.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
