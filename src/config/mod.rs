//! Configuration: TOML file, environment and CLI overrides.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ConfigError, ConfigFile, LayoutSection, ResolvedConfig,
};
