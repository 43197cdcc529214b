use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{DEFAULT_DATA_DIR, DataPaths};
use crate::errors::TurismoError;
use crate::routing::Route;

const CONFIG_DIR_NAME: &str = "turismo-bogota";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1100.,
            height: 720.,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub window_size: WindowSize,
    pub last_route: Route,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            window_size: WindowSize::default(),
            last_route: Route::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the user's config, or `None` when it has never been saved.
    pub fn from_local_file() -> Result<Option<Self>, TurismoError> {
        match Self::default_path() {
            Some(path) => Self::from_file(&path),
            None => Ok(None),
        }
    }

    pub fn from_file(path: &Path) -> Result<Option<Self>, TurismoError> {
        if !path.exists() {
            return Ok(None);
        }
        let file =
            std::fs::File::open(path).map_err(|e| TurismoError::ConfigIOError { source: e })?;
        let config = serde_json::from_reader(file)
            .map_err(|e| TurismoError::ConfigSerializeError { source: e })?;
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), TurismoError> {
        let path = Self::default_path().ok_or(TurismoError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), TurismoError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TurismoError::ConfigIOError { source: e })?;
        }
        let file =
            std::fs::File::create(path).map_err(|e| TurismoError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| TurismoError::ConfigSerializeError { source: e })
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::in_dir(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(
            AppConfig::from_file(&dir.path().join("config.json"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            data_dir: PathBuf::from("/srv/turismo"),
            last_route: Route::Crime,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap(), Some(config));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"last_route":"Profile"}"#).unwrap();
        let config = AppConfig::from_file(&path).unwrap().unwrap();
        assert_eq!(config.last_route, Route::Profile);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.window_size, WindowSize::default());
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(TurismoError::ConfigSerializeError { .. })
        ));
    }
}
