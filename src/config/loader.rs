//! Configuration file loading with precedence handling.

use crate::export::{ExportLayout, PageGeometry};
use crate::state::{ListOptions, PageSize, SaveStrategy};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "EXTRACTLY_CONFIG";

/// Environment variable overriding the export output directory.
pub const OUTPUT_DIR_ENV_VAR: &str = "EXTRACTLY_OUTPUT_DIR";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Name of the offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/extractly/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows per page of the key point table.
    #[serde(default)]
    pub key_point_page_size: Option<usize>,

    /// Rows per page requested from the history service.
    #[serde(default)]
    pub history_page_size: Option<usize>,

    /// Wait between a delete request and the removal, in milliseconds.
    #[serde(default)]
    pub grace_delay_ms: Option<u64>,

    /// Save strategy of the key point table.
    #[serde(default)]
    pub key_point_save: Option<SaveStrategy>,

    /// Save strategy of the history table.
    #[serde(default)]
    pub history_save: Option<SaveStrategy>,

    /// Use the true wrapped line count in the summary export.
    #[serde(default)]
    pub exact_summary: Option<bool>,

    /// Directory exports are written to.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Page geometry of exported documents.
    #[serde(default)]
    pub layout: Option<LayoutSection>,
}

/// `[layout]` section from TOML.
///
/// ```toml
/// [layout]
/// page_width_chars = 90
/// page_height = 270
/// top_margin = 15
/// left_margin = 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Wrap width of body text, in display columns.
    #[serde(default)]
    pub page_width_chars: Option<usize>,
    /// Cursor position past which a new page starts.
    #[serde(default)]
    pub page_height: Option<u32>,
    /// First line position on every page.
    #[serde(default)]
    pub top_margin: Option<u32>,
    /// X position of titles and the text origin.
    #[serde(default)]
    pub left_margin: Option<u32>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows per page of the key point table.
    pub key_point_page_size: PageSize,
    /// Rows per page requested from the history service.
    pub history_page_size: PageSize,
    /// Wait between a delete request and the removal.
    pub grace_delay: Duration,
    /// Save strategy of the key point table.
    pub key_point_save: SaveStrategy,
    /// Save strategy of the history table.
    pub history_save: SaveStrategy,
    /// Advance by the true wrapped line count in the summary export.
    pub exact_summary: bool,
    /// Directory exports are written to.
    pub output_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Page geometry of exported documents.
    pub geometry: PageGeometry,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            key_point_page_size: PageSize::default(),
            history_page_size: PageSize::default(),
            grace_delay: crate::state::DEFAULT_GRACE_DELAY,
            key_point_save: SaveStrategy::LocalFirst,
            history_save: SaveStrategy::ConfirmFirst,
            exact_summary: false,
            output_dir: PathBuf::from("."),
            log_file_path: default_log_path(),
            geometry: PageGeometry::default(),
        }
    }
}

impl ResolvedConfig {
    /// View model options of the key point table.
    pub fn key_point_options(&self) -> ListOptions {
        ListOptions::key_points(self.key_point_page_size)
            .with_grace_delay(self.grace_delay)
            .with_save_strategy(self.key_point_save)
    }

    /// View model options of the history table.
    pub fn history_options(&self) -> ListOptions {
        ListOptions::history(self.history_page_size)
            .with_grace_delay(self.grace_delay)
            .with_save_strategy(self.history_save)
    }

    /// Layout of both export documents.
    pub fn export_layout(&self) -> ExportLayout {
        let layout = ExportLayout {
            geometry: self.geometry,
            ..ExportLayout::default()
        };
        if self.exact_summary {
            layout.with_exact_summary()
        } else {
            layout
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/extractly/extractly.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("extractly").join("extractly.log")
    } else {
        PathBuf::from("extractly.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/extractly/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("extractly").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `EXTRACTLY_CONFIG` environment variable
/// 3. Default path `~/.config/extractly/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        if env_path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(format!("{} is set but empty", CONFIG_ENV_VAR)));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for a page size of zero.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let layout = config.layout.unwrap_or_default();
    let geometry = PageGeometry {
        page_width_chars: layout
            .page_width_chars
            .unwrap_or(defaults.geometry.page_width_chars),
        page_height: layout.page_height.unwrap_or(defaults.geometry.page_height),
        top_margin: layout.top_margin.unwrap_or(defaults.geometry.top_margin),
        left_margin: layout.left_margin.unwrap_or(defaults.geometry.left_margin),
        title_height: defaults.geometry.title_height,
    };

    Ok(ResolvedConfig {
        key_point_page_size: page_size(
            "key_point_page_size",
            config.key_point_page_size,
            defaults.key_point_page_size,
        )?,
        history_page_size: page_size(
            "history_page_size",
            config.history_page_size,
            defaults.history_page_size,
        )?,
        grace_delay: config
            .grace_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.grace_delay),
        key_point_save: config.key_point_save.unwrap_or(defaults.key_point_save),
        history_save: config.history_save.unwrap_or(defaults.history_save),
        exact_summary: config.exact_summary.unwrap_or(defaults.exact_summary),
        output_dir: config.output_dir.unwrap_or(defaults.output_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        geometry,
    })
}

fn page_size(
    field: &'static str,
    value: Option<usize>,
    default: PageSize,
) -> Result<PageSize, ConfigError> {
    match value {
        None => Ok(default),
        Some(size) => PageSize::new(size).map_err(|e| ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `EXTRACTLY_OUTPUT_DIR`: Override export directory
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV_VAR) {
        config.output_dir = PathBuf::from(dir);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    output_dir_override: Option<PathBuf>,
    exact_summary_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(dir) = output_dir_override {
        config.output_dir = dir;
    }

    if let Some(exact) = exact_summary_override {
        config.exact_summary = exact;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
