//! Backups of the client document
//!
//! `BackupManager` writes archives named `backup-YYYYMMDD-HHMMSS-mmm.json`
//! into the backup directory and prunes them: the newest
//! `daily_count` backups are kept, plus the oldest backup of each of the
//! last `monthly_count` months. `RestoreManager` checks an archive and
//! writes its client list back.
//!
//! Archive layout:
//! - `schema_version`
//! - `created_at`
//! - `clients`: the client document as it was on disk

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager, ARCHIVE_SCHEMA_VERSION};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
