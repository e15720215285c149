//! Redirect profiles.
//!
//! A profile is a named table of rule chains, one chain per [`Operation`].
//! It is built once, then consulted read-only by the interception path.

pub mod selector;

use crate::rules::{self, Operation, Rule};
use std::ffi::{CStr, OsStr, OsString};
use std::path::Path;

pub use selector::{build_profile, select_profile};

/// A named bundle of redirect rules for one running program.
#[derive(Debug)]
pub struct Profile {
	name: OsString,
	op_table: [Vec<Rule>; Operation::COUNT],
}

impl Profile {
	/// Construct an empty profile; every operation starts with an empty chain.
	///
	/// The name is kept as raw bytes, so any C string is accepted.
	pub fn new(name: impl Into<OsString>) -> Self {
		Profile {
			name: name.into(),
			op_table: std::array::from_fn(|_| Vec::new()),
		}
	}

	pub fn name(&self) -> &OsStr {
		&self.name
	}

	/// Append `rule` to the tail of its operation's chain.
	///
	/// No duplicate detection: a later rule with the same source is shadowed
	/// by the earlier one.
	pub fn insert_rule(&mut self, rule: Rule) {
		let op = rule.operation();
		log::trace!(
			"profile {}: insert {} rule into {}",
			self.name.to_string_lossy(),
			rule.kind(),
			op
		);
		self.op_table[op.index()].push(rule);
	}

	/// The chain for `op`, in match order.
	pub fn chain(&self, op: Operation) -> &[Rule] {
		&self.op_table[op.index()]
	}

	/// Total number of rules across every chain.
	pub fn rule_count(&self) -> usize {
		self.op_table.iter().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.rule_count() == 0
	}

	/// Resolve `path` for `op`, returning the rewritten or original path.
	pub fn resolve<'a>(&'a self, op: Operation, path: &'a Path) -> &'a Path {
		rules::resolve(self.chain(op), path)
	}

	/// C string flavor of [`Profile::resolve`].
	pub fn resolve_cstr<'a>(&'a self, op: Operation, path: &'a CStr) -> &'a CStr {
		rules::resolve_cstr(self.chain(op), path)
	}

	/// Tear the profile down, returning how many rules were released.
	///
	/// The profile is consumed, so it cannot be destroyed twice:
	///
	/// ```compile_fail
	/// use redirect_shim::Profile;
	///
	/// let profile = Profile::new("game-x");
	/// profile.destroy();
	/// profile.destroy();
	/// ```
	pub fn destroy(mut self) -> usize {
		let released = self
			.op_table
			.iter_mut()
			.map(|chain| {
				let len = chain.len();
				chain.clear();
				len
			})
			.sum();
		log::debug!(
			"profile {}: released {} rules",
			self.name.to_string_lossy(),
			released
		);
		released
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::os::unix::ffi::OsStrExt;

	fn game_profile() -> Profile {
		let mut profile = Profile::new("game-x");
		profile.insert_rule(
			Rule::path_replacement("/opt/game/save.dat", "/home/user/.local/game/save.dat")
				.unwrap(),
		);
		profile
	}

	#[test]
	fn test_new_profile_is_empty() {
		let profile = Profile::new("empty");
		assert_eq!(profile.name(), "empty");
		assert!(profile.is_empty());
		for op in Operation::ALL {
			assert!(profile.chain(op).is_empty());
			let path = Path::new("/any/path");
			assert_eq!(profile.resolve(op, path), path);
		}
	}

	#[test]
	fn test_game_scenario() {
		let profile = game_profile();

		assert_eq!(
			profile.resolve(Operation::Open, Path::new("/opt/game/save.dat")),
			Path::new("/home/user/.local/game/save.dat")
		);
		assert_eq!(
			profile.resolve(Operation::Open, Path::new("/opt/game/other.dat")),
			Path::new("/opt/game/other.dat")
		);
		assert_eq!(
			profile.resolve_cstr(Operation::Open, c"/opt/game/save.dat"),
			c"/home/user/.local/game/save.dat"
		);
	}

	#[test]
	fn test_insert_appends() {
		let mut profile = Profile::new("order");
		profile.insert_rule(Rule::path_replacement("/a", "/r1").unwrap());
		profile.insert_rule(Rule::path_replacement("/a", "/r2").unwrap());
		profile.insert_rule(Rule::path_replacement("/b", "/r3").unwrap());

		let chain = profile.chain(Operation::Open);
		assert_eq!(chain.len(), 3);
		assert_eq!(
			chain[0],
			Rule::path_replacement("/a", "/r1").unwrap()
		);
		assert_eq!(
			profile.resolve(Operation::Open, Path::new("/a")),
			Path::new("/r1")
		);
	}

	#[test]
	fn test_destroy_releases_every_rule() {
		let mut profile = Profile::new("count");
		for i in 0..16 {
			profile.insert_rule(
				Rule::path_replacement(format!("/src/{i}"), format!("/dst/{i}")).unwrap(),
			);
		}
		assert_eq!(profile.rule_count(), 16);
		assert_eq!(profile.destroy(), 16);
	}

	#[test]
	fn test_name_keeps_raw_bytes() {
		let name = OsStr::from_bytes(b"game-\xe9");
		let profile = Profile::new(name);
		assert_eq!(profile.name().as_bytes(), b"game-\xe9");
	}

	#[test]
	fn test_destroy_empty_profile() {
		assert_eq!(Profile::new("empty").destroy(), 0);
	}

	#[test]
	fn test_concurrent_resolve() {
		let profile = game_profile();
		let profile = &profile;

		std::thread::scope(|scope| {
			for _ in 0..8 {
				scope.spawn(move || {
					for _ in 0..1000 {
						assert_eq!(
							profile.resolve(Operation::Open, Path::new("/opt/game/save.dat")),
							Path::new("/home/user/.local/game/save.dat")
						);
						assert_eq!(
							profile.resolve(Operation::Open, Path::new("/etc/hosts")),
							Path::new("/etc/hosts")
						);
					}
				});
			}
		});
	}
}
