//! Redirect profiles for syscall interposition shims.
//!
//! A shim that intercepts `open`-family calls keeps one [`Profile`] for the
//! running executable and asks it to rewrite each path argument before the
//! real call proceeds. This library provides:
//! - Redirect rules and per-operation rule chains
//! - First-match-wins path resolution
//! - TOML profile definitions and per-executable selection
//! - A C ABI for native interposition code
//!
//! # Example
//!
//! ```
//! use redirect_shim::{Operation, Profile, Rule};
//! use std::path::Path;
//!
//! let mut profile = Profile::new("game-x");
//! profile.insert_rule(
//!     Rule::path_replacement("/opt/game/save.dat", "/home/user/.local/game/save.dat")?,
//! );
//!
//! assert_eq!(
//!     profile.resolve(Operation::Open, Path::new("/opt/game/save.dat")),
//!     Path::new("/home/user/.local/game/save.dat"),
//! );
//! # Ok::<(), redirect_shim::RedirectError>(())
//! ```

pub mod config;
pub mod error;
pub mod ffi;
pub mod profile;
pub mod rules;

pub use error::{RedirectError, Result};
pub use profile::Profile;
pub use rules::{Operation, Rule, RuleKind};
