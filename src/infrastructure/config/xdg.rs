//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "voice-sampler";
const FILE_NAME: &str = "config.toml";

/// TOML config under the user's XDG config directory
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self {
            path: config_dir.join(FILE_NAME),
        }
    }

    /// Store at an explicit file path instead of the XDG location
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file");
                return Ok(AppConfig::empty());
            }
            Err(e) => return Err(ConfigError::ReadError(e.to_string())),
        };
        debug!(path = %self.path.display(), "config loaded");

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }
        self.save(&AppConfig::defaults()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_path_is_under_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.to_string_lossy().contains(APP_DIR));
        assert!(path.ends_with(FILE_NAME));
    }

    #[tokio::test]
    async fn explicit_path_is_used_for_reads_and_writes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.toml");
        let store = XdgConfigStore::with_path(&file);

        assert_eq!(store.path(), file);
        assert!(!store.exists());

        store
            .save(&AppConfig {
                waveform_width: Some(32),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(file.exists());
        let written = std::fs::read_to_string(&file).unwrap();
        assert!(written.contains("waveform_width = 32"));
        assert_eq!(store.load().await.unwrap().waveform_width, Some(32));
    }

    #[tokio::test]
    async fn unreadable_path_is_read_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be
        let store = XdgConfigStore::with_path(dir.path());
        assert!(matches!(store.load().await, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn parse_flat_toml() {
        let content = r#"
endpoint = "http://localhost:9000"
max_duration = "20s"
audio_cues = true
waveform_width = 60
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.max_duration.as_deref(), Some("20s"));
        assert_eq!(config.audio_cues, Some(true));
        assert_eq!(config.waveform_width, Some(60));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let result = XdgConfigStore::parse_toml("endpoint = [");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("none.toml"));
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join(FILE_NAME));

        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());

        let again = store.init().await;
        assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join(FILE_NAME));
        let config = AppConfig {
            endpoint: Some("https://songs.example".into()),
            audio_cues: Some(false),
            ..Default::default()
        };

        store.save(&config).await.unwrap();
        assert_eq!(store.load().await.unwrap(), config);
    }
}
