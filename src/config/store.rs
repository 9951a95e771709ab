use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use super::{ConfigError, ModuleConfig, ModuleState, Result};

/// Directory-backed JSON settings for one named module.
///
/// Two files live side by side:
///   `config_<name>.json`       bounds, edited by hand, read at startup
///   `saved_state_<name>.json`  written by the module when the clip mode changes
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
    name: String,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            dir: dir.into(),
            name: name.to_owned(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(format!("config_{}.json", self.name))
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(format!("saved_state_{}.json", self.name))
    }

    /// Read the bounds, falling back to `defaults` when the file is missing
    /// or unreadable. The result is always clamped.
    pub fn load_config(&self, defaults: ModuleConfig) -> ModuleConfig {
        let path = self.config_path();
        match read_json::<ModuleConfig>(&path) {
            Ok(Some(cfg)) => cfg.clamped(),
            Ok(None) => {
                log::debug!("no config at {}, using defaults", path.display());
                defaults.clamped()
            }
            Err(err) => {
                log::warn!("{err}, using defaults");
                defaults.clamped()
            }
        }
    }

    pub fn save_config(&self, config: &ModuleConfig) -> Result<()> {
        write_json(&self.config_path(), config)
    }

    /// Read the persisted state, defaulting on a missing or malformed file.
    pub fn load_state(&self) -> ModuleState {
        match read_json::<ModuleState>(&self.state_path()) {
            Ok(state) => state.unwrap_or_default(),
            Err(err) => {
                log::warn!("{err}, starting from default state");
                ModuleState::default()
            }
        }
    }

    pub fn save_state(&self, state: &ModuleState) -> Result<()> {
        write_json(&self.state_path(), state)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            })
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Json {
            path: path.to_owned(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| ConfigError::Io {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let text = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Json {
        path: path.to_owned(),
        source,
    })?;
    fs::write(path, text).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::ClipMode;

    #[test]
    fn missing_files_give_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "BezierSingle");
        assert_eq!(store.load_config(ModuleConfig::default()), ModuleConfig::default());
        assert_eq!(store.load_state(), ModuleState::default());
    }

    #[test]
    fn state_roundtrips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "BezierSingle");
        let state = ModuleState {
            clip_mode: ClipMode::Fold,
        };
        store.save_state(&state).expect("save");
        assert_eq!(store.load_state(), state);
    }

    #[test]
    fn malformed_config_falls_back_and_clamps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "BezierSingle");
        fs::write(store.config_path(), "{ not json").expect("write");
        assert_eq!(store.load_config(ModuleConfig::default()), ModuleConfig::default());

        fs::write(store.config_path(), r#"{ "MAX_FREQUENCY": 99.0 }"#).expect("write");
        let cfg = store.load_config(ModuleConfig::default());
        assert_eq!(cfg.max_frequency, crate::MAX_FREQUENCY_HZ);
    }

    #[test]
    fn bad_state_file_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path(), "BezierSingle");
        fs::write(store.state_path(), r#"{"clip_mode": 9}"#).expect("write");
        assert_eq!(store.load_state(), ModuleState::default());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path().join("nested/settings"), "BezierMulti");
        store.save_config(&ModuleConfig::multi()).expect("save");
        assert_eq!(store.load_config(ModuleConfig::default()), ModuleConfig::multi());
    }
}
