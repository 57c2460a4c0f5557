//! Configuration Loader
//!
//! Handles loading and merging configuration from multiple sources with proper precedence.

use crate::settings::{parse_switch, ColorChoice, SettingsFile};
use crate::{ConfigError, ConfigResult};
use std::env;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "tdd.toml";

/// Configuration loader
///
/// Loads configuration from multiple sources and merges them with proper precedence:
/// 1. Global config (~/.tdd/config.toml) - lowest priority
/// 2. Project config (./tdd.toml) - overrides global
/// 3. Environment variables (TDD_COLOR, NO_COLOR, TDD_QUIET_PANICS) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
pub struct ConfigLoader {
    /// Cached global config path
    global_config_path: Option<PathBuf>,
}

/// Merged configuration result
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Merged settings from every layer
    pub settings: SettingsFile,

    /// Directory where tdd.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            global_config_path: None,
        }
    }

    /// Use an explicit global config file instead of ~/.tdd/config.toml
    pub fn with_global_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find tdd.toml, then layers it over the
    /// global config and applies environment overrides.
    pub fn load_from_directory(&mut self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project) = self.find_project_config(start_dir)?;
        let global = self.load_global_config()?;

        let settings = apply_env_overrides(global.merge(project))?;

        Ok(Config {
            settings,
            project_root,
        })
    }

    /// Load configuration from a specific project config file
    pub fn load_from_file(&mut self, config_path: &Path) -> ConfigResult<Config> {
        let project = SettingsFile::load_from_file(config_path)?;
        let global = self.load_global_config()?;

        let settings = apply_env_overrides(global.merge(project))?;

        Ok(Config {
            settings,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, SettingsFile)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let settings = SettingsFile::load_from_file(&config_path)?;
                return Ok((Some(current), settings));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, SettingsFile::default())),
            }
        }
    }

    /// Load global configuration from ~/.tdd/config.toml
    ///
    /// A missing file or home directory means no global layer. A file that
    /// exists but does not parse is an error, same as a bad project file.
    fn load_global_config(&mut self) -> ConfigResult<SettingsFile> {
        let path = match &self.global_config_path {
            Some(path) => path.clone(),
            None => {
                let path = match Self::global_config_dir() {
                    Ok(dir) => dir.join("config.toml"),
                    Err(ConfigError::HomeNotFound) => return Ok(SettingsFile::default()),
                    Err(e) => return Err(e),
                };
                self.global_config_path = Some(path.clone());
                path
            }
        };

        match SettingsFile::load_from_file(&path) {
            Err(ConfigError::NotFound(_)) => Ok(SettingsFile::default()),
            other => other,
        }
    }

    /// Get the global configuration directory (~/.tdd)
    pub fn global_config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".tdd"))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply environment variable overrides
///
/// `NO_COLOR` forces colour off; `TDD_COLOR` is applied after it and wins.
fn apply_env_overrides(mut settings: SettingsFile) -> ConfigResult<SettingsFile> {
    if env::var_os("NO_COLOR").is_some() {
        settings.output.get_or_insert_with(Default::default).color = Some(ColorChoice::Never);
    }

    if let Ok(color) = env::var("TDD_COLOR") {
        settings.output.get_or_insert_with(Default::default).color = Some(color.parse()?);
    }

    if let Ok(quiet) = env::var("TDD_QUIET_PANICS") {
        let quiet = parse_switch(&quiet).ok_or_else(|| ConfigError::InvalidValue {
            field: "run.quiet_panics".to_string(),
            reason: format!("expected on or off, got '{}'", quiet),
        })?;
        settings.run.get_or_insert_with(Default::default).quiet_panics = Some(quiet);
    }

    Ok(settings)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: SettingsFile::default(),
            project_root: None,
        }
    }
}

impl Config {
    /// Effective colour choice (default: auto)
    pub fn color(&self) -> ColorChoice {
        self.settings.color().unwrap_or_default()
    }

    /// Whether the panic hook is silenced during a run (default: true)
    pub fn quiet_panics(&self) -> bool {
        self.settings.quiet_panics().unwrap_or(true)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a tdd.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    fn isolated_loader(dir: &Path) -> ConfigLoader {
        env::remove_var("NO_COLOR");
        env::remove_var("TDD_COLOR");
        env::remove_var("TDD_QUIET_PANICS");
        ConfigLoader::new().with_global_config_path(dir.join("missing-global.toml"))
    }

    #[test]
    #[serial]
    fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "[output]\ncolor = \"always\"\n");

        let config = isolated_loader(temp_dir.path())
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert!(config.is_project());
        assert_eq!(config.color(), ColorChoice::Always);
    }

    #[test]
    #[serial]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "[run]\nquiet_panics = false\n");

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let config = isolated_loader(temp_dir.path())
            .load_from_directory(&sub_dir)
            .unwrap();

        assert!(!config.quiet_panics());
        assert_eq!(config.project_root(), Some(temp_dir.path()));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.color(), ColorChoice::Auto);
        assert!(config.quiet_panics());
        assert!(!config.is_project());
    }

    #[test]
    #[serial]
    fn test_env_override_color() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(temp_dir.path(), "[output]\ncolor = \"always\"\n");

        env::set_var("TDD_COLOR", "never");
        let config = isolated_loader(temp_dir.path())
            .load_from_directory(temp_dir.path())
            .unwrap();
        env::remove_var("TDD_COLOR");

        assert_eq!(config.color(), ColorChoice::Never);
    }

    #[test]
    #[serial]
    fn test_env_invalid_color() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("TDD_COLOR", "plaid");
        let result = isolated_loader(temp_dir.path()).load_from_directory(temp_dir.path());
        env::remove_var("TDD_COLOR");

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn test_global_config_is_lowest_priority() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        fs::write(&global, "[output]\ncolor = \"never\"\n[run]\nquiet_panics = false\n").unwrap();

        let project_dir = temp_dir.path().join("project");
        fs::create_dir(&project_dir).unwrap();
        create_config_file(&project_dir, "[output]\ncolor = \"always\"\n");

        env::remove_var("NO_COLOR");
        let config = ConfigLoader::new()
            .with_global_config_path(&global)
            .load_from_directory(&project_dir)
            .unwrap();

        assert_eq!(config.color(), ColorChoice::Always);
        assert!(!config.quiet_panics());
    }
}
