//! Configuration loading and parsing for redirect profiles.
//!
//! This module handles:
//! - TOML profile file parsing and validation
//! - User/system config discovery
//! - Config merging
//! - Starter config generation

pub mod cascade;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{
	CONFIG_ENV_VAR, DISABLE_ENV_VAR, SYSTEM_CONFIG_PATH, discover_configs, discover_configs_in,
	load_explicit_config, load_merged_config, merge_configs, redirection_disabled,
	user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use template::{TEMPLATE_FILE_NAME, generate_init_template};
pub use types::{Config, LoadedConfig, MergedConfig, ProfileConfig, ProfileWithSource, RuleConfig};
