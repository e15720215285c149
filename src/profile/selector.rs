use crate::config::cascade::redirection_disabled;
use crate::config::types::{MergedConfig, ProfileConfig};
use crate::error::{RedirectError, Result};
use crate::profile::Profile;
use std::path::Path;

/// Build a runtime profile from its definition, inserting rules in file order.
pub fn build_profile(config: &ProfileConfig) -> Result<Profile> {
	let mut profile = Profile::new(config.name.as_str());

	for rule in &config.rules {
		let rule = rule.to_rule().map_err(|source| RedirectError::InvalidRule {
			profile: config.name.clone(),
			source: Box::new(source),
		})?;
		profile.insert_rule(rule);
	}

	log::debug!(
		"built profile {} with {} rules",
		config.name,
		profile.rule_count()
	);
	Ok(profile)
}

/// Pick and build the profile for `executable`.
///
/// The first profile in cascade order whose executables (or, failing those,
/// whose name) match the executable's file name wins. Returns `None` when
/// nothing matches or redirection is disabled through the environment.
pub fn select_profile(config: &MergedConfig, executable: &Path) -> Result<Option<Profile>> {
	if redirection_disabled() {
		log::debug!("redirection disabled through the environment");
		return Ok(None);
	}

	let Some(file_name) = executable.file_name().and_then(|name| name.to_str()) else {
		return Ok(None);
	};

	let Some(entry) = config
		.profiles
		.iter()
		.find(|entry| entry.profile.matches_executable(file_name))
	else {
		log::debug!("no profile for {}", file_name);
		return Ok(None);
	};

	log::debug!(
		"selected profile {} from {} for {}",
		entry.profile.name,
		entry.source.display(),
		file_name
	);
	build_profile(&entry.profile).map(Some)
}
