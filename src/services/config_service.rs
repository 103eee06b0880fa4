use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::errors::FileError;
use super::file_service::{read_json, write_json};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where project records and categories live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Seeded list held in memory, reset on restart
    Memory,
    /// One JSON file per project under the data directory
    #[default]
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub port: u16,
    pub cors_origin: Option<String>,
    pub storage: StorageBackend,
    /// Seed the file store with the sample projects on first start.
    pub seed_projects: bool,
    pub admin_username: Option<String>,
    /// bcrypt hash, produce one with `craftfolio hash-password`.
    pub admin_password_hash: Option<String>,
    pub contact_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_origin: None,
            storage: StorageBackend::default(),
            seed_projects: true,
            admin_username: None,
            admin_password_hash: None,
            contact_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }
}

pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

pub fn load_config(data_dir: &Path) -> Result<Config, FileError> {
    let config_path = get_config_path(data_dir);
    Ok(read_json(&config_path)?.unwrap_or_default())
}

pub fn save_config(data_dir: &Path, config: &Config) -> Result<(), FileError> {
    write_json(&get_config_path(data_dir), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.contact_delay(), Duration::from_secs(2));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            get_config_path(dir.path()),
            r#"{ "port": 8080, "storage": "memory" }"#,
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.seed_projects);
    }

    #[test]
    fn saved_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            admin_username: Some("judi".to_string()),
            ..Config::default()
        };
        save_config(dir.path(), &config).unwrap();

        let back = load_config(dir.path()).unwrap();
        assert_eq!(back.admin_username.as_deref(), Some("judi"));
    }
}
