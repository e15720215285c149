use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, ProfileWithSource};
use crate::error::{RedirectError, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "REDIRECT_CONFIG";

/// Environment variable that, if truthy, disables profile selection.
pub const DISABLE_ENV_VAR: &str = "REDIRECT_DISABLE";

/// System-wide config file, consulted after the user's.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/redirect/profiles.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. If `REDIRECT_CONFIG` is set, only that file
/// 2. Otherwise the user config, then the system config
/// 3. A file with `root = true` ends the cascade
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs() -> Result<Vec<LoadedConfig>> {
	if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
		return Ok(vec![load_explicit_config(Path::new(&path))?]);
	}

	let candidates = [user_config_path()?, PathBuf::from(SYSTEM_CONFIG_PATH)];
	discover_configs_in(&candidates)
}

/// Load the existing files among `candidates`, in order, honouring `root`.
pub fn discover_configs_in(candidates: &[PathBuf]) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();

	for path in candidates {
		if !path.exists() {
			continue;
		}

		let config = parse_config_file(path)?;
		let root = config.root;
		log::debug!("loaded {} profiles from {}", config.profiles.len(), path.display());
		configs.push(LoadedConfig {
			config,
			path: path.clone(),
		});

		if root {
			break;
		}
	}

	Ok(configs)
}

/// Load a single config file that the caller asked for by name.
pub fn load_explicit_config(path: &Path) -> Result<LoadedConfig> {
	if !path.exists() {
		return Err(RedirectError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	Ok(LoadedConfig {
		config: parse_config_file(path)?,
		path: path.to_path_buf(),
	})
}

/// Merge multiple configs into a single effective config.
///
/// Profiles are collected in cascade order (first match wins).
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		for profile in &loaded.config.profiles {
			merged.profiles.push(ProfileWithSource {
				profile: profile.clone(),
				source: loaded.path.clone(),
			});
		}
	}

	merged
}

/// Load and merge configs, from `explicit` if given, else by discovery.
pub fn load_merged_config(explicit: Option<&Path>) -> Result<MergedConfig> {
	let configs = match explicit {
		Some(path) => vec![load_explicit_config(path)?],
		None => discover_configs()?,
	};
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(RedirectError::HomeDirectoryNotFound)?;
	Ok(config_dir.join("redirect").join("profiles.toml"))
}

/// Whether redirection has been switched off through the environment.
pub fn redirection_disabled() -> bool {
	is_env_truthy(DISABLE_ENV_VAR)
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}
