//! Configuration loading from `.augmentpy.toml` or `pyproject.toml`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{CONFIG_FILENAME, PYPROJECT_FILENAME};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for AugmentPy.
    pub augmentpy: AugmentPyConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for AugmentPy.
pub struct AugmentPyConfig {
    /// List of folders to exclude from scanning.
    pub exclude_folders: Option<Vec<String>>,
    /// Whether to also flag `x = 1 + x` for commutative operators.
    pub commutative: Option<bool>,
    /// List of rule codes to ignore.
    pub ignore: Option<Vec<String>>,
    /// Whether `check` exits nonzero when findings are present.
    pub fail_on_findings: Option<bool>,
}

impl Config {
    /// Whether the commutative-operand variant of the rule is enabled
    /// (default: enabled).
    #[must_use]
    pub fn commutative_enabled(&self) -> bool {
        self.augmentpy.commutative.unwrap_or(true)
    }

    /// Whether a rule code is ignored by configuration.
    #[must_use]
    pub fn is_rule_ignored(&self, code: &str) -> bool {
        self.augmentpy
            .ignore
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|ignored| ignored == code)
    }

    /// Extra folder exclusions from configuration.
    #[must_use]
    pub fn exclude_folders(&self) -> &[String] {
        self.augmentpy.exclude_folders.as_deref().unwrap_or_default()
    }

    /// Loads configuration from default locations in the current directory.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let augmentpy_toml = current.join(CONFIG_FILENAME);
            if augmentpy_toml.exists() {
                if let Ok(content) = fs::read_to_string(&augmentpy_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(augmentpy_toml);
                        return config;
                    }
                }
            }

            // 2. Try PYPROJECT_FILENAME
            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        return Config {
                            augmentpy: pyproject.tool.augmentpy,
                            config_file_path: Some(pyproject_toml),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    augmentpy: AugmentPyConfig,
}
