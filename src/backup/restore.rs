//! Backup restoration
//!
//! Reads an archive, checks that it holds a usable client list and writes
//! that list back as the client document.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::paths::SalonPaths;
use crate::error::{SalonError, SalonResult};
use crate::models::Client;
use crate::storage::write_json_atomic;

use super::manager::{BackupArchive, ARCHIVE_SCHEMA_VERSION};

/// Handles restoring from backups
pub struct RestoreManager {
    paths: SalonPaths,
}

impl RestoreManager {
    pub fn new(paths: SalonPaths) -> Self {
        Self { paths }
    }

    fn read_archive(backup_path: &Path) -> SalonResult<BackupArchive> {
        let contents = fs::read_to_string(backup_path)
            .map_err(|e| SalonError::Io(format!("Failed to read backup file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SalonError::Json(format!("Failed to parse backup file: {}", e)))
    }

    /// Overwrite the client document with the archive's client list
    pub fn restore_from_file(&self, backup_path: &Path) -> SalonResult<RestoreResult> {
        let archive = Self::read_archive(backup_path)?;
        let validation = validate_archive(&archive);
        if let Some(problem) = validation.problem {
            return Err(SalonError::Validation(format!(
                "Backup {} cannot be restored: {}",
                backup_path.display(),
                problem
            )));
        }

        self.paths.ensure_directories()?;
        write_json_atomic(self.paths.clients_file(), &archive.clients)?;

        tracing::info!(
            path = %backup_path.display(),
            clients = validation.client_count,
            "Restored backup"
        );

        Ok(RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            client_count: validation.client_count,
        })
    }

    /// Check a backup without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> SalonResult<ValidationResult> {
        let archive = Self::read_archive(backup_path)?;
        Ok(validate_archive(&archive))
    }
}

fn validate_archive(archive: &BackupArchive) -> ValidationResult {
    let mut result = ValidationResult {
        schema_version: archive.schema_version,
        backup_date: archive.created_at,
        client_count: 0,
        problem: None,
    };

    if archive.schema_version > ARCHIVE_SCHEMA_VERSION {
        result.problem = Some(format!(
            "schema version {} is newer than supported ({})",
            archive.schema_version, ARCHIVE_SCHEMA_VERSION
        ));
        return result;
    }

    if !archive.clients.is_array() {
        result.problem = Some("client list is not a JSON array".to_string());
        return result;
    }

    match serde_json::from_value::<Vec<Client>>(archive.clients.clone()) {
        Ok(clients) => {
            result.client_count = clients.len();
            let mut ids = HashSet::new();
            if let Some(dup) = clients.iter().find(|c| !ids.insert(c.id)) {
                result.problem = Some(format!("duplicate client id {}", dup.id));
            }
        }
        Err(e) => result.problem = Some(format!("unreadable client record: {}", e)),
    }

    result
}

/// Result of a restore
#[derive(Debug)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub client_count: usize,
}

impl RestoreResult {
    pub fn summary(&self) -> String {
        format!(
            "Restored {} client(s) from backup taken {}",
            self.client_count,
            self.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Result of checking a backup
#[derive(Debug)]
pub struct ValidationResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub client_count: usize,
    /// Why the backup cannot be restored
    pub problem: Option<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }

    pub fn summary(&self) -> String {
        match &self.problem {
            None => format!("Valid backup with {} client(s)", self.client_count),
            Some(problem) => format!("Invalid backup: {}", problem),
        }
    }
}
