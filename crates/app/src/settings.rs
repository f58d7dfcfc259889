//! Handles settings for the application.
//!
//! Values come from, in increasing priority: defaults, the TOML file
//! (`config/crowdfund.toml` unless `--config` says otherwise), environment
//! variables such as `CROWDFUND__ENGINE__MODE=stretch`, and command line flags.
use std::path::PathBuf;

use config::{Config, Environment, File};
use engine::Mode;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/crowdfund.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level applied to the `crowdfund` and `engine` targets.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub data_dir: PathBuf,
    pub mode: Mode,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(engine::Engine::DEFAULT_DATA_DIR),
            mode: Mode::Basic,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub engine: EngineSettings,
}

impl Settings {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .add_source(Environment::with_prefix("CROWDFUND").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_default_file_uses_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.engine.mode, Mode::Basic);
        assert_eq!(settings.engine.data_dir, PathBuf::from("Database"));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crowdfund.toml");
        fs::write(
            &path,
            "[app]\nlevel = \"debug\"\n\n[engine]\ndata_dir = \"/srv/funding\"\nmode = \"stretch\"\n",
        )
        .unwrap();

        let settings = Settings::load(path.to_str()).unwrap();
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.engine.mode, Mode::Stretch);
        assert_eq!(settings.engine.data_dir, PathBuf::from("/srv/funding"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Settings::load(Some("/nonexistent/crowdfund.toml")).is_err());
    }
}
