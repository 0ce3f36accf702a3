//! File I/O utilities with atomic writes
//!
//! Writes go to a temporary file in the same directory and are renamed over
//! the target, so a crash leaves either the old or the new document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SalonError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, SalonError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    read_json_required(path)
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> Result<T, SalonError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| SalonError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SalonError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SalonError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SalonError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SalonError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SalonError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SalonError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SalonError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SalonError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let data: Vec<u32> = read_json(temp_dir.path().join("clients.json")).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("clients.json");

        write_json_atomic(&path, &vec!["Anna", "Ewa"]).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("data").join("clients.json.tmp").exists());

        let loaded: Vec<String> = read_json(&path).unwrap();
        assert_eq!(loaded, vec!["Anna", "Ewa"]);
    }

    #[test]
    fn test_required_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result: Result<Vec<u32>, _> = read_json_required(temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(SalonError::Storage(_))));
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clients.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<u32>, _> = read_json(&path);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
