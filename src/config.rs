use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The configuration file read from the working directory.
const CONFIG_FILE: &str = "config.yaml";

/// Written on first start so the operator has something to edit.
const DEFAULT_CONFIG: &str = "\
title: daybook
server:
  port: 25252
security:
  password: \"123456\"
storage:
  diary_root: diary
";

/// The application's configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The title shown by the UI.
    pub title: String,
    pub server: ServerSettings,
    pub security: SecuritySettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The TCP port to listen on.
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// The single shared secret protecting every entry.
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// The entry storage root, absolute or relative to the working
    /// directory.
    pub diary_root: String,
}

impl Settings {
    /// Loads settings from defaults, then `config.yaml` if present,
    /// then `DAYBOOK_`-prefixed environment variables (e.g.
    /// `DAYBOOK_SERVER__PORT=8080` sets `server.port`).
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("title", "daybook")?
            .set_default("server.port", 25252)?
            .set_default("security.password", "123456")?
            .set_default("storage.diary_root", "diary")?
            .add_source(
                config::File::new(CONFIG_FILE, config::FileFormat::Yaml).required(false),
            )
            .add_source(
                config::Environment::with_prefix("DAYBOOK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to assemble configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Writes the default `config.yaml` if none exists yet.
    pub fn ensure_default_file() -> Result<()> {
        if Path::new(CONFIG_FILE).exists() {
            return Ok(());
        }
        std::fs::write(CONFIG_FILE, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write default {}", CONFIG_FILE))?;
        tracing::info!("Default {} created", CONFIG_FILE);
        Ok(())
    }
}

impl StorageSettings {
    /// The storage root resolved against the current working
    /// directory when the configured path is relative.
    pub fn resolved_root(&self) -> Result<PathBuf> {
        let root = PathBuf::from(&self.diary_root);
        if root.is_absolute() {
            return Ok(root);
        }
        let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
        Ok(cwd.join(root))
    }
}
