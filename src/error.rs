use std::path::PathBuf;

/// Library-level structured errors for redirect profiles.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RedirectError {
	#[error("Rule path must not be empty ({field})")]
	EmptyPath { field: &'static str },

	#[error("Rule path contains a NUL byte: {path}")]
	InteriorNul { path: PathBuf },

	#[error("Unknown redirect operation: {id}")]
	UnknownOperation { id: String },

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid rule in profile {profile}")]
	InvalidRule {
		profile: String,
		#[source]
		source: Box<RedirectError>,
	},

	#[error("Profile defined twice in one file: {name}")]
	DuplicateProfile { name: String },

	#[error("Failed to resolve config directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using RedirectError.
pub type Result<T> = std::result::Result<T, RedirectError>;
