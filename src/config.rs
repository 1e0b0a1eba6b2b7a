//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/alloctree/alloctree.toml`
//! 3. Local config: `<dir>/.alloctree.toml`
//! 4. Environment variables: `ALLOCTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{RoundingMode, RoundingPolicy};

/// Raw rounding settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRounding {
    pub decimals: Option<u32>,
    pub mode: Option<RoundingMode>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub table: Option<PathBuf>,
    pub rounding: RawRounding,
}

/// Unified configuration for alloctree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Default table file, used when no `--file` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<PathBuf>,
    /// Rounding applied to redistributed shares and displayed numbers
    pub rounding: RoundingPolicy,
}

/// Get the XDG config directory for alloctree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "alloctree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("alloctree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".alloctree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        self.table = self.table.as_deref().map(expand_path);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            table: overlay.table.clone().or_else(|| self.table.clone()),
            rounding: RoundingPolicy {
                decimals: overlay.rounding.decimals.unwrap_or(self.rounding.decimals),
                mode: overlay.rounding.mode.unwrap_or(self.rounding.mode),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.alloctree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let files = Self::merge_files(global_config_path().as_deref(), local_dir)?;

        let mut current = Self::apply_env_overrides(files)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// File layers only: defaults, then `global`, then `<local_dir>/.alloctree.toml`.
    ///
    /// Missing files are skipped; the environment is not consulted.
    pub fn load_files(
        global: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::merge_files(global, local_dir)?;
        current.expand_paths();
        current.validate()?;
        Ok(current)
    }

    fn merge_files(
        global: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Ok(current)
    }

    /// Apply ALLOCTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ALLOCTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("table") {
            settings.table = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_int("rounding.decimals") {
            settings.rounding.decimals = u32::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("ALLOCTREE_ROUNDING__DECIMALS out of range: {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("rounding.mode") {
            settings.rounding.mode = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        RoundingPolicy::new(self.rounding.decimals, self.rounding.mode)?;
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# alloctree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/alloctree/alloctree.toml
#   Local:  <dir>/.alloctree.toml
#   Env:    ALLOCTREE_* environment variables, e.g. ALLOCTREE_ROUNDING__MODE=half_even

# Table file used when --file is not given
# table = "~/budgets/2024.toml"

[rounding]
# Decimals kept for redistributed shares (0..=10)
# decimals = 2

# Tie-breaking: "half_away_from_zero" or "half_even"
# mode = "half_away_from_zero"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_two_decimals_half_away() {
        let settings = Settings::default();
        assert_eq!(settings.rounding.decimals, 2);
        assert_eq!(settings.rounding.mode, RoundingMode::HalfAwayFromZero);
        assert!(settings.table.is_none());
    }

    #[test]
    fn given_overlay_when_merging_then_specified_fields_win() {
        let base = Settings {
            table: Some(PathBuf::from("base.toml")),
            rounding: RoundingPolicy::default(),
        };
        let overlay = RawSettings {
            table: None,
            rounding: RawRounding {
                decimals: Some(4),
                mode: None,
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.table, Some(PathBuf::from("base.toml")));
        assert_eq!(result.rounding.decimals, 4);
        assert_eq!(result.rounding.mode, RoundingMode::HalfAwayFromZero);
    }

    #[test]
    fn given_tilde_in_table_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            table: Some(PathBuf::from("~/budget.toml")),
            rounding: RoundingPolicy::default(),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let table = settings.table.expect("table set");
        assert!(table.to_string_lossy().starts_with(&home));
        assert!(!table.to_string_lossy().contains('~'));
    }

    #[test]
    fn given_too_many_decimals_when_validating_then_errors() {
        let settings = Settings {
            table: None,
            rounding: RoundingPolicy {
                decimals: 12,
                mode: RoundingMode::HalfEven,
            },
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.table.is_none());
        assert!(raw.rounding.decimals.is_none());
    }
}
