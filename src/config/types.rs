use crate::error::{RedirectError, Result};
use crate::rules::Rule;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Top-level configuration from a `profiles.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the cascade at this file.
	#[serde(default)]
	pub root: bool,

	/// Profile definitions. The first profile matching an executable wins.
	#[serde(default)]
	pub profiles: Vec<ProfileConfig>,
}

/// A profile definition: which executables it applies to and its rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileConfig {
	/// Profile name. Matched against the executable file name when
	/// `executables` is empty.
	pub name: String,

	/// Executable file names this profile applies to.
	#[serde(default)]
	pub executables: Vec<String>,

	/// Rules in match order.
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// A rule definition, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleConfig {
	/// Replace the exact path `source` with `target`.
	PathReplacement { source: PathBuf, target: PathBuf },
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from every file in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All profiles from all configs, in cascade order (first match wins).
	pub profiles: Vec<ProfileWithSource>,
}

/// A profile with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct ProfileWithSource {
	pub profile: ProfileConfig,

	/// The config file this profile came from.
	pub source: PathBuf,
}

impl RuleConfig {
	/// Build the runtime rule for this definition.
	pub fn to_rule(&self) -> Result<Rule> {
		match self {
			RuleConfig::PathReplacement { source, target } => Rule::path_replacement(source, target),
		}
	}
}

impl ProfileConfig {
	/// Whether this profile applies to an executable with the given file name.
	pub fn matches_executable(&self, file_name: &str) -> bool {
		if self.executables.is_empty() {
			self.name == file_name
		} else {
			self.executables.iter().any(|exe| exe == file_name)
		}
	}

	/// Validate that every rule can be built.
	pub fn validate(&self) -> Result<()> {
		for rule in &self.rules {
			rule.to_rule().map_err(|source| RedirectError::InvalidRule {
				profile: self.name.clone(),
				source: Box::new(source),
			})?;
		}
		Ok(())
	}
}

impl Config {
	/// Validate all profiles in this config.
	pub fn validate(&self) -> Result<()> {
		let mut seen = HashSet::new();
		for profile in &self.profiles {
			if !seen.insert(profile.name.as_str()) {
				return Err(RedirectError::DuplicateProfile {
					name: profile.name.clone(),
				});
			}
			profile.validate()?;
		}
		Ok(())
	}
}
