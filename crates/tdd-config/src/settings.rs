//! Configuration file schema shared by `tdd.toml` and `~/.tdd/config.toml`.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// When the report should be coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour only when writing to a terminal
    #[default]
    Auto,
    /// Always colour verdict keywords
    Always,
    /// Never colour
    Never,
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => match parse_switch(other) {
                Some(true) => Ok(ColorChoice::Always),
                Some(false) => Ok(ColorChoice::Never),
                None => Err(ConfigError::InvalidValue {
                    field: "output.color".to_string(),
                    reason: format!("expected auto, always or never, got '{}'", other),
                }),
            },
        }
    }
}

/// Parse an on/off switch as written in environment variables.
///
/// Accepts `on`, `true`, `yes`, `1` and `off`, `false`, `no`, `0` in any case.
pub(crate) fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(name)
    }
}

/// A parsed configuration file. Every field is optional so that files can be
/// layered on top of each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Report output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSettings>,

    /// Runner behaviour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunSettings>,
}

/// `[output]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorChoice>,
}

/// `[run]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Silence the panic hook while tests run (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_panics: Option<bool>,
}

impl SettingsFile {
    /// Load a settings file from disk
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::TomlParseError { error, .. } => ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::TomlParseError {
            file: Default::default(),
            error: e,
        })
    }

    pub fn color(&self) -> Option<ColorChoice> {
        self.output.as_ref().and_then(|o| o.color)
    }

    pub fn quiet_panics(&self) -> Option<bool> {
        self.run.as_ref().and_then(|r| r.quiet_panics)
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(mut self, other: SettingsFile) -> SettingsFile {
        if let Some(color) = other.color() {
            self.output.get_or_insert_with(Default::default).color = Some(color);
        }
        if let Some(quiet) = other.quiet_panics() {
            self.run.get_or_insert_with(Default::default).quiet_panics = Some(quiet);
        }
        self
    }
}
