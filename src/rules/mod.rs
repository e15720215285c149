//! Redirect rules and matching.
//!
//! This module handles:
//! - The closed set of intercepted operations
//! - Rule variants and their matching policy
//! - First-match-wins chain traversal

pub mod matcher;
pub mod operation;
pub mod rule;

pub use matcher::{resolve, resolve_cstr};
pub use operation::Operation;
pub use rule::{PathReplacement, Rule, RuleKind};
