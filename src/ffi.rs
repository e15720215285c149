//! C ABI for native interposition code.
//!
//! Ownership follows the C conventions: constructors return heap pointers
//! (null on failure), `*_destroy` releases them, and inserting a rule into a
//! profile transfers the rule to the profile.

use crate::config::load_merged_config;
use crate::profile::{Profile, select_profile};
use crate::rules::{Operation, Rule};
use std::ffi::{CStr, OsStr, c_char};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

/// Borrow a C path argument, or `None` for null.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_path<'a>(ptr: *const c_char) -> Option<&'a Path> {
	if ptr.is_null() {
		return None;
	}
	// SAFETY: caller guarantees a valid NUL-terminated string
	let bytes = unsafe { CStr::from_ptr(ptr) }.to_bytes();
	Some(Path::new(OsStr::from_bytes(bytes)))
}

/// Construct a path replacement rule. Returns null on invalid input.
///
/// # Safety
/// Both arguments must be null or valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_rule_new_path_replacement(
	source: *const c_char,
	target: *const c_char,
) -> *mut Rule {
	// SAFETY: forwarded caller contract
	let (Some(source), Some(target)) = (unsafe { c_path(source) }, unsafe { c_path(target) })
	else {
		log::warn!("redirect_rule_new_path_replacement: null path");
		return ptr::null_mut();
	};

	match Rule::path_replacement(source, target) {
		Ok(rule) => Box::into_raw(Box::new(rule)),
		Err(e) => {
			log::warn!("redirect_rule_new_path_replacement: {e}");
			ptr::null_mut()
		}
	}
}

/// Release a rule that was never inserted into a profile. Null is a no-op.
///
/// # Safety
/// `rule` must be null or a pointer returned by a rule constructor that has
/// not been destroyed or inserted.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_rule_destroy(rule: *mut Rule) {
	if !rule.is_null() {
		// SAFETY: caller hands back a pointer from Box::into_raw
		drop(unsafe { Box::from_raw(rule) });
	}
}

/// Construct an empty profile owning a copy of `name`. Returns null only for
/// a null name.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_profile_new(name: *const c_char) -> *mut Profile {
	if name.is_null() {
		return ptr::null_mut();
	}
	// SAFETY: caller guarantees a valid NUL-terminated string
	let name = OsStr::from_bytes(unsafe { CStr::from_ptr(name) }.to_bytes());
	Box::into_raw(Box::new(Profile::new(name)))
}

/// Release a profile and every rule it owns. Null is a no-op.
///
/// # Safety
/// `profile` must be null or a live pointer from a profile constructor.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_profile_destroy(profile: *mut Profile) {
	if !profile.is_null() {
		// SAFETY: caller hands back a pointer from Box::into_raw
		unsafe { Box::from_raw(profile) }.destroy();
	}
}

/// Append `rule` to its operation's chain. The profile takes ownership of
/// the rule; the caller must not destroy it afterwards.
///
/// # Safety
/// `profile` must be a live profile pointer and `rule` a live, not yet
/// inserted rule pointer. Nothing may resolve through `profile` concurrently.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_profile_insert_rule(profile: *mut Profile, rule: *mut Rule) {
	if profile.is_null() || rule.is_null() {
		log::warn!("redirect_profile_insert_rule: null argument");
		return;
	}
	// SAFETY: both pointers come from Box::into_raw and are exclusively ours
	let (profile, rule) = unsafe { (&mut *profile, Box::from_raw(rule)) };
	profile.insert_rule(*rule);
}

/// Resolve `path` for operation `op`.
///
/// Returns either `path` itself or a profile-owned string that stays valid
/// until the profile is destroyed. An unknown `op` aborts the process.
///
/// # Safety
/// `profile` must be a live profile pointer and `path` null or a valid
/// NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_profile_resolve(
	profile: *const Profile,
	op: u32,
	path: *const c_char,
) -> *const c_char {
	let op = match Operation::try_from(op) {
		Ok(op) => op,
		Err(e) => {
			log::error!("redirect_profile_resolve: {e}");
			std::process::abort();
		}
	};
	if profile.is_null() || path.is_null() {
		return path;
	}

	// SAFETY: caller guarantees both pointers are live for this call
	let (profile, input) = unsafe { (&*profile, CStr::from_ptr(path)) };
	profile.resolve_cstr(op, input).as_ptr()
}

/// Select and build the configured profile for `executable`.
///
/// Returns null when no profile applies or the configuration cannot be
/// loaded.
///
/// # Safety
/// `executable` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn redirect_profile_select(executable: *const c_char) -> *mut Profile {
	// SAFETY: forwarded caller contract
	let Some(executable) = (unsafe { c_path(executable) }) else {
		return ptr::null_mut();
	};

	let selected = load_merged_config(None).and_then(|config| select_profile(&config, executable));
	match selected {
		Ok(Some(profile)) => Box::into_raw(Box::new(profile)),
		Ok(None) => ptr::null_mut(),
		Err(e) => {
			log::warn!("redirect_profile_select: {e}");
			ptr::null_mut()
		}
	}
}
