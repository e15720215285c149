use crate::rules::rule::Rule;
use std::ffi::CStr;
use std::path::Path;

/// Walk a chain in order and return the first rewrite, or `path` unchanged.
///
/// Never mutates the chain, so any number of callers may resolve through a
/// shared reference at once.
pub fn resolve<'a>(chain: &'a [Rule], path: &'a Path) -> &'a Path {
	match chain.iter().find_map(|rule| rule.rewrite(path)) {
		Some(target) => {
			log::trace!("redirect {} -> {}", path.display(), target.display());
			target
		}
		None => path,
	}
}

/// C string flavor of [`resolve`], used at the ABI boundary.
pub fn resolve_cstr<'a>(chain: &'a [Rule], path: &'a CStr) -> &'a CStr {
	chain
		.iter()
		.find_map(|rule| rule.rewrite_cstr(path))
		.unwrap_or(path)
}
