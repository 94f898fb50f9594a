//! Project configuration management for `viewwatch.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── routes     # [routes]
//! │   └── watch      # [watch]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # ConfigField
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! Every field has a default, so a project without a config file works with
//! the standard Vaadin layout.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildSectionConfig, RoutesConfig, WatchConfig};
pub use types::{ConfigDiagnostics, ConfigError, ConfigField};

use crate::cli::{Cli, Commands};
use crate::log;
use crate::plugin::BuildContext;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing viewwatch.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Absolute path to the config file, whether or not it exists (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against (internal use only)
    #[serde(skip)]
    pub base: PathBuf,

    /// Frontend layout
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Watch-mode timing
    #[serde(default)]
    pub watch: WatchConfig,

    /// Registry inputs
    #[serde(default)]
    pub routes: RoutesConfig,
}

impl ProjectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults
    /// are resolved against the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let (config_path, exists) = match find_config_file(&cli.config) {
            Some(path) => (path, true),
            None => (cwd.join(&cli.config), false),
        };

        if config_path.is_dir() {
            let msg = format!("`{}` is a directory, not a config file", config_path.display());
            return Err(ConfigError::Validation(msg).into());
        }

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            crate::debug!("config"; "{} not found, using defaults", cli.config.display());
            Self::default()
        };

        config.config_path = normalize_path(&config_path);
        config.base = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(cli)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply CLI overrides, validate and normalize.
    fn finalize(&mut self, cli: &Cli) -> Result<()> {
        self.apply_command_options(cli);
        // Before normalization turns every path absolute
        self.validate_paths()?;
        self.normalize_paths();
        self.validate()
    }

    fn apply_command_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.root, cli.root.as_ref());
        Self::update_option(&mut self.build.out_dir, cli.out_dir.as_ref());

        if let Commands::Watch { debounce_ms } = &cli.command {
            Self::update_option(&mut self.watch.debounce_ms, debounce_ms.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    fn normalize_paths(&mut self) {
        let base = normalize_path(&self.base);
        self.build.normalize(&base);
        self.routes.normalize(&base);
        self.base = base;
    }

    fn validate_paths(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate_paths(&mut diag);
        Ok(diag.into_result()?)
    }

    /// Validate settings that do not depend on path layout.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.watch.validate(&mut diag);
        Ok(diag.into_result()?)
    }

    /// Resolved paths for the lifecycle controller.
    pub fn build_context(&self) -> BuildContext {
        self.build.context()
    }

    /// Whether the settings came from a file on disk.
    pub fn has_file(&self) -> bool {
        self.config_path.is_file()
    }
}

/// Parse config content, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
