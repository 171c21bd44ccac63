// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use roster_app::{DEFAULT_CANDIDATE_COUNT, DEFAULT_SELECT_VISIBLE_LIMIT};
use roster_tui::DEFAULT_ROW_HEIGHT;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "roster";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub count: Option<i64>,
    /// Unset means a fresh dataset every launch.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub select_visible_limit: Option<i64>,
    pub row_height: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ROSTER_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ROSTER_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [data], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(count) = self.data.count
            && count <= 0
        {
            bail!(
                "data.count in {} must be positive, got {}",
                path.display(),
                count
            );
        }

        if let Some(limit) = self.ui.select_visible_limit
            && limit <= 0
        {
            bail!(
                "ui.select_visible_limit in {} must be positive, got {}",
                path.display(),
                limit
            );
        }

        if let Some(height) = self.ui.row_height
            && !(1..=i64::from(u16::MAX)).contains(&height)
        {
            bail!(
                "ui.row_height in {} must be between 1 and {}, got {}",
                path.display(),
                u16::MAX,
                height
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join(", "),
                level
            );
        }

        Ok(())
    }

    pub fn candidate_count(&self) -> usize {
        self.data
            .count
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or(DEFAULT_CANDIDATE_COUNT)
    }

    pub fn seed(&self) -> Option<u64> {
        self.data.seed
    }

    pub fn select_visible_limit(&self) -> usize {
        self.ui
            .select_visible_limit
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(DEFAULT_SELECT_VISIBLE_LIMIT)
    }

    pub fn row_height(&self) -> u16 {
        self.ui
            .row_height
            .and_then(|height| u16::try_from(height).ok())
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    pub fn log_level(&self) -> String {
        self.log
            .level
            .as_deref()
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_ascii_lowercase()
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_log_path(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# roster config\n# Place this file at: {}\n\nversion = 1\n\n[data]\ncount = {}\n# Optional. Unset generates a different dataset every launch.\n# seed = 42\n\n[ui]\nselect_visible_limit = {}\nrow_height = {}\n\n[log]\n# Optional. Default is platform data dir (for example ~/.local/share/roster/roster.log)\n# path = \"/absolute/path/to/roster.log\"\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_CANDIDATE_COUNT,
            DEFAULT_SELECT_VISIBLE_LIMIT,
            DEFAULT_ROW_HEIGHT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn default_log_path() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [log].path in the config file")
    })?;
    Ok(data_root.join(APP_NAME).join("roster.log"))
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use roster_testkit::temp_config_file;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.candidate_count(), 10_000);
        assert_eq!(config.select_visible_limit(), 1_000);
        assert_eq!(config.row_height(), 1);
        assert_eq!(config.seed(), None);
        assert_eq!(config.log_level(), "info");
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = temp_config_file("[data]\ncount = 5\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[data], [ui], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = temp_config_file(
            "version = 1\n[data]\ncount = 250\nseed = 7\n[ui]\nselect_visible_limit = 20\nrow_height = 2\n[log]\npath = \"/tmp/roster-test.log\"\nlevel = \"DEBUG\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.candidate_count(), 250);
        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.select_visible_limit(), 20);
        assert_eq!(config.row_height(), 2);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/roster-test.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = temp_config_file("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = temp_config_file("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn non_positive_limits_are_rejected() -> Result<()> {
        for (contents, needle) in [
            ("version = 1\n[data]\ncount = 0\n", "data.count"),
            (
                "version = 1\n[ui]\nselect_visible_limit = -3\n",
                "ui.select_visible_limit",
            ),
            ("version = 1\n[ui]\nrow_height = 0\n", "ui.row_height"),
        ] {
            let (_temp, path) = temp_config_file(contents)?;
            let error = Config::load(&path).expect_err("invalid value should fail");
            assert!(
                error.to_string().contains(needle),
                "unexpected message: {error}"
            );
        }
        Ok(())
    }

    #[test]
    fn unknown_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = temp_config_file("version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("unknown level should fail");
        let message = error.to_string();
        assert!(message.contains("log.level"));
        assert!(message.contains("trace"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("ROSTER_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("ROSTER_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("ROSTER_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("roster/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_parses_back_to_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[data]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.candidate_count(), 10_000);
        assert_eq!(config.select_visible_limit(), 1_000);
        Ok(())
    }
}
