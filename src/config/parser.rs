use crate::config::types::Config;
use crate::error::{RedirectError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content =
		std::fs::read_to_string(path).map_err(|source| RedirectError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| RedirectError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::RuleConfig;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("", &path).unwrap();

		assert!(!config.root);
		assert!(config.profiles.is_empty());
	}

	#[test]
	fn test_parse_profiles_array_of_tables() {
		let content = r#"
root = true

[[profiles]]
name = "game-x"
executables = ["game-x", "game-x.bin"]

[[profiles.rules]]
kind = "path-replacement"
source = "/opt/game/save.dat"
target = "/home/user/.local/game/save.dat"

[[profiles.rules]]
kind = "path-replacement"
source = "/opt/game/config.ini"
target = "/home/user/.config/game/config.ini"

[[profiles]]
name = "other"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert_eq!(config.profiles.len(), 2);

		let game = &config.profiles[0];
		assert_eq!(game.name, "game-x");
		assert_eq!(game.executables, vec!["game-x", "game-x.bin"]);
		assert_eq!(game.rules.len(), 2);
		assert_eq!(
			game.rules[0],
			RuleConfig::PathReplacement {
				source: PathBuf::from("/opt/game/save.dat"),
				target: PathBuf::from("/home/user/.local/game/save.dat"),
			}
		);

		let other = &config.profiles[1];
		assert!(other.executables.is_empty());
		assert!(other.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_inline_tables() {
		let content = r#"
[[profiles]]
name = "game-x"
rules = [
    { kind = "path-replacement", source = "/a", target = "/b" },
    { kind = "path-replacement", source = "/c", target = "/d" },
]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.profiles[0].rules.len(), 2);
	}

	#[test]
	fn test_unknown_rule_kind() {
		let content = r#"
[[profiles]]
name = "game-x"
rules = [{ kind = "prefix-replacement", source = "/a", target = "/b" }]
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		assert!(matches!(
			result,
			Err(RedirectError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_empty_rule_path() {
		let content = r#"
[[profiles]]
name = "game-x"
rules = [{ kind = "path-replacement", source = "", target = "/b" }]
"#;
		let path = PathBuf::from("test.toml");
		match parse_config_str(content, &path).unwrap_err() {
			RedirectError::InvalidRule { profile, source } => {
				assert_eq!(profile, "game-x");
				assert!(matches!(*source, RedirectError::EmptyPath { field: "source" }));
			}
			_ => panic!("Expected InvalidRule error"),
		}
	}

	#[test]
	fn test_duplicate_profile_name() {
		let content = r#"
[[profiles]]
name = "game-x"

[[profiles]]
name = "game-x"
"#;
		let path = PathBuf::from("test.toml");
		match parse_config_str(content, &path).unwrap_err() {
			RedirectError::DuplicateProfile { name } => assert_eq!(name, "game-x"),
			_ => panic!("Expected DuplicateProfile error"),
		}
	}

	#[test]
	fn test_parse_config_file_missing() {
		let result = parse_config_file(Path::new("/nonexistent/redirect/profiles.toml"));
		assert!(matches!(result, Err(RedirectError::ConfigReadError { .. })));
	}
}
