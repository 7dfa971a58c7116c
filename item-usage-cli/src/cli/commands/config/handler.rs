//! Settings file command handlers

use anyhow::Result;
use colored::*;
use std::path::Path;

use super::ConfigCommands;
use crate::config::{self, Settings};

pub fn handle_config_command(command: ConfigCommands) -> Result<()> {
    let path = config::config_path()?;
    apply(command, &path)
}

fn apply(command: ConfigCommands, path: &Path) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load_from(path)?;
            println!("{}", format!("Settings ({})", path.display()).bold());
            for (key, value) in settings.entries() {
                match value {
                    Some(value) => println!("  {:<14} {}", key, value.bright_green()),
                    None => println!("  {:<14} {}", key, "(not set)".dimmed()),
                }
            }
        }
        ConfigCommands::Set { key, value } => {
            let mut settings = Settings::load_from(path)?;
            settings.set(&key, &value)?;
            settings.save_to(path)?;
            println!("Set {}", key.bright_green());
        }
        ConfigCommands::Unset { key } => {
            let mut settings = Settings::load_from(path)?;
            settings.unset(&key)?;
            settings.save_to(path)?;
            println!("Unset {}", key.bright_green());
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_unset_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        apply(
            ConfigCommands::Set {
                key: "project_id".to_string(),
                value: "975bf280".to_string(),
            },
            &path,
        )
        .unwrap();
        assert_eq!(
            Settings::load_from(&path).unwrap().project_id.as_deref(),
            Some("975bf280")
        );

        apply(
            ConfigCommands::Unset {
                key: "project_id".to_string(),
            },
            &path,
        )
        .unwrap();
        assert_eq!(Settings::load_from(&path).unwrap().project_id, None);
    }

    #[test]
    fn test_unknown_key_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let result = apply(
            ConfigCommands::Set {
                key: "colour".to_string(),
                value: "blue".to_string(),
            },
            &path,
        );
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
