//! Backup manager
//!
//! Writes timestamped JSON archives of the client document and prunes them
//! with a daily/monthly retention policy.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::SalonPaths;
use crate::config::settings::BackupRetention;
use crate::error::{SalonError, SalonResult};

/// Current archive layout version
pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Oldest backup of its calendar month; kept under the monthly quota
    pub is_monthly: bool,
}

/// Backup archive format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    /// The client document exactly as it was on disk
    pub clients: serde_json::Value,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: SalonPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: SalonPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            paths,
            retention,
        }
    }

    /// Archive the current client document; returns the archive path
    pub fn create_backup(&self) -> SalonResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| SalonError::Io(format!("Failed to create backup directory: {}", e)))?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: ARCHIVE_SCHEMA_VERSION,
            created_at: now,
            clients: read_clients_value(&self.paths.clients_file())?,
        };

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| SalonError::Json(format!("Failed to serialize backup: {}", e)))?;

        fs::write(&backup_path, json)
            .map_err(|e| SalonError::Io(format!("Failed to write backup file: {}", e)))?;

        tracing::info!(path = %backup_path.display(), "Created backup");
        Ok(backup_path)
    }

    /// List backups, newest first
    pub fn list_backups(&self) -> SalonResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)
            .map_err(|e| SalonError::Io(format!("Failed to read backup directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| SalonError::Io(format!("Failed to read directory entry: {}", e)))?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Walk oldest to newest; the first backup seen in a month is its monthly one
        let mut months = HashSet::new();
        for backup in backups.iter_mut().rev() {
            let month = (backup.created_at.year(), backup.created_at.month());
            backup.is_monthly = months.insert(month);
        }

        Ok(backups)
    }

    /// Delete backups beyond the retention policy; returns deleted paths
    pub fn enforce_retention(&self) -> SalonResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) = self
            .list_backups()?
            .into_iter()
            .partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path)
                .map_err(|e| SalonError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            tracing::info!(count = deleted.len(), "Pruned old backups");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> SalonResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Find a backup by file name
    pub fn get_backup(&self, filename: &str) -> SalonResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    pub fn get_latest_backup(&self) -> SalonResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

/// The client document as raw JSON; a missing file is an empty list
fn read_clients_value(path: &Path) -> SalonResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Array(Vec::new()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| SalonError::Io(format!("Failed to read file for backup: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| SalonError::Json(format!("Failed to parse JSON for backup: {}", e)))
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Parse `YYYYMMDD-HHMMSS` or `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y%m%d").ok()?;
    let time_part = parts.next()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || time_part.len() != 6 {
        return None;
    }

    let time = NaiveTime::parse_from_str(time_part, "%H%M%S").ok()?;
    let time = time.with_nanosecond(millis.checked_mul(1_000_000)?)?;
    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
