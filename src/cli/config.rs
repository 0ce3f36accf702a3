//! Configuration CLI commands

use clap::Subcommand;

use crate::accounting::Locale;
use crate::config::paths::SalonPaths;
use crate::config::settings::Settings;
use crate::error::{SalonError, SalonResult};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Change a setting
    Set {
        /// Setting name (currency, date-format, locale, recent-services,
        /// daily-backups, monthly-backups)
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &SalonPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> SalonResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("salon-ledger Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Client data:      {}", paths.clients_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  currency:        {}", settings.currency_symbol);
            println!("  date-format:     {}", settings.date_format);
            println!("  locale:          {}", settings.locale);
            println!("  recent-services: {}", settings.recent_services_shown);
            println!(
                "  backups:         {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
        }

        ConfigCommands::Set { key, value } => {
            apply_setting(settings, &key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

fn apply_setting(settings: &mut Settings, key: &str, value: &str) -> SalonResult<()> {
    let number = |value: &str| -> SalonResult<u32> {
        value.trim().parse().map_err(|_| {
            SalonError::Validation(format!("'{}' expects a whole number, got '{}'", key, value))
        })
    };

    match key {
        "currency" => settings.currency_symbol = value.trim().to_string(),
        "date-format" => {
            if value.trim().is_empty() {
                return Err(SalonError::Validation("Date format cannot be empty".into()));
            }
            settings.date_format = value.to_string();
        }
        "locale" => {
            settings.locale = value.parse::<Locale>().map_err(SalonError::Validation)?;
        }
        "recent-services" => settings.recent_services_shown = number(value)? as usize,
        "daily-backups" => settings.backup_retention.daily_count = number(value)?,
        "monthly-backups" => settings.backup_retention.monthly_count = number(value)?,
        other => {
            return Err(SalonError::Config(format!("Unknown setting: {}", other)));
        }
    }

    tracing::info!(key, value, "Changed setting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_setting() {
        let mut settings = Settings::default();

        apply_setting(&mut settings, "locale", "root").unwrap();
        apply_setting(&mut settings, "currency", " EUR ").unwrap();
        apply_setting(&mut settings, "recent-services", "5").unwrap();

        assert_eq!(settings.locale, Locale::Root);
        assert_eq!(settings.currency_symbol, "EUR");
        assert_eq!(settings.recent_services_shown, 5);
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut settings = Settings::default();

        assert!(apply_setting(&mut settings, "locale", "klingon").is_err());
        assert!(apply_setting(&mut settings, "daily-backups", "many").is_err());
        assert!(apply_setting(&mut settings, "colour", "red").is_err());
        assert_eq!(settings.locale, Locale::Polish);
    }
}
