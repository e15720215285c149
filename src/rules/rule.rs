use crate::error::{RedirectError, Result};
use crate::rules::operation::Operation;
use std::ffi::{CStr, CString, OsStr};
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Tag identifying a rule variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
	PathReplacement,
}

impl RuleKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			RuleKind::PathReplacement => "path-replacement",
		}
	}
}

impl fmt::Display for RuleKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Replace one exact source path with a target path.
///
/// Both paths are kept NUL-terminated so the target can be handed straight
/// back to a C caller without another allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReplacement {
	source: CString,
	target: CString,
}

impl PathReplacement {
	pub fn new(source: &Path, target: &Path) -> Result<Self> {
		Ok(PathReplacement {
			source: owned_c_path("source", source)?,
			target: owned_c_path("target", target)?,
		})
	}

	/// The path this rule matches.
	pub fn source(&self) -> &Path {
		c_to_path(&self.source)
	}

	/// The replacement path.
	pub fn target(&self) -> &Path {
		c_to_path(&self.target)
	}

	pub fn target_cstr(&self) -> &CStr {
		&self.target
	}

	/// Exact byte equality; no normalisation, prefix or glob.
	fn matches(&self, path: &[u8]) -> bool {
		self.source.to_bytes() == path
	}
}

/// A single match-and-rewrite instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
	PathReplacement(PathReplacement),
}

impl Rule {
	/// Construct a path replacement rule owning copies of both paths.
	pub fn path_replacement(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<Self> {
		PathReplacement::new(source.as_ref(), target.as_ref()).map(Rule::PathReplacement)
	}

	pub fn kind(&self) -> RuleKind {
		match self {
			Rule::PathReplacement(_) => RuleKind::PathReplacement,
		}
	}

	/// The operation whose chain this rule belongs to.
	pub fn operation(&self) -> Operation {
		match self {
			Rule::PathReplacement(_) => Operation::Open,
		}
	}

	/// Rewrite `path` if this rule matches it.
	pub fn rewrite(&self, path: &Path) -> Option<&Path> {
		match self {
			Rule::PathReplacement(replacement) => replacement
				.matches(path.as_os_str().as_bytes())
				.then(|| replacement.target()),
		}
	}

	/// Rewrite a C path if this rule matches it.
	pub fn rewrite_cstr(&self, path: &CStr) -> Option<&CStr> {
		match self {
			Rule::PathReplacement(replacement) => replacement
				.matches(path.to_bytes())
				.then(|| replacement.target_cstr()),
		}
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rule::PathReplacement(replacement) => write!(
				f,
				"{}: {} -> {}",
				self.kind(),
				replacement.source().display(),
				replacement.target().display()
			),
		}
	}
}

fn owned_c_path(field: &'static str, path: &Path) -> Result<CString> {
	let bytes = path.as_os_str().as_bytes();
	if bytes.is_empty() {
		return Err(RedirectError::EmptyPath { field });
	}

	CString::new(bytes).map_err(|_| RedirectError::InteriorNul {
		path: path.to_path_buf(),
	})
}

fn c_to_path(s: &CStr) -> &Path {
	Path::new(OsStr::from_bytes(s.to_bytes()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_path_replacement_kind() {
		let rule = Rule::path_replacement("/opt/game/save.dat", "/tmp/save.dat").unwrap();
		assert_eq!(rule.kind(), RuleKind::PathReplacement);
		assert_eq!(rule.operation(), Operation::Open);
	}

	#[test]
	fn test_rule_owns_its_paths() {
		let mut source = String::from("/opt/game/save.dat");
		let rule = Rule::path_replacement(&source, "/tmp/save.dat").unwrap();
		source.clear();

		let Rule::PathReplacement(replacement) = &rule;
		assert_eq!(replacement.source(), Path::new("/opt/game/save.dat"));
		assert_eq!(replacement.target(), Path::new("/tmp/save.dat"));
		assert_eq!(replacement.target_cstr().to_bytes(), b"/tmp/save.dat");
	}

	#[test]
	fn test_empty_path_rejected() {
		match Rule::path_replacement("", "/tmp/x").unwrap_err() {
			RedirectError::EmptyPath { field } => assert_eq!(field, "source"),
			_ => panic!("Expected EmptyPath error"),
		}
		match Rule::path_replacement("/tmp/x", "").unwrap_err() {
			RedirectError::EmptyPath { field } => assert_eq!(field, "target"),
			_ => panic!("Expected EmptyPath error"),
		}
	}

	#[test]
	fn test_interior_nul_rejected() {
		let result = Rule::path_replacement("/tmp/a\0b", "/tmp/x");
		assert!(matches!(result, Err(RedirectError::InteriorNul { .. })));
	}

	#[test]
	fn test_rewrite_exact_only() {
		let rule = Rule::path_replacement("/opt/game/data", "/srv/data").unwrap();

		assert_eq!(
			rule.rewrite(Path::new("/opt/game/data")),
			Some(Path::new("/srv/data"))
		);
		// No prefix matching and no path normalisation
		assert_eq!(rule.rewrite(Path::new("/opt/game/data/file")), None);
		assert_eq!(rule.rewrite(Path::new("/opt/game/data/")), None);
		assert_eq!(rule.rewrite(Path::new("/opt//game/data")), None);
	}

	#[test]
	fn test_rewrite_cstr() {
		let rule = Rule::path_replacement("/a", "/b").unwrap();
		assert_eq!(rule.rewrite_cstr(c"/a"), Some(c"/b"));
		assert_eq!(rule.rewrite_cstr(c"/c"), None);
	}

	#[test]
	fn test_display() {
		let rule = Rule::path_replacement("/a", "/b").unwrap();
		assert_eq!(rule.to_string(), "path-replacement: /a -> /b");
	}
}
