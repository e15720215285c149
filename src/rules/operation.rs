use crate::error::{RedirectError, Result};
use std::fmt;
use std::str::FromStr;

/// The syscall category a rule chain applies to.
///
/// Discriminants are part of the C ABI: `Open` is `0`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Open = 0,
}

impl Operation {
	/// Every known operation, in table order.
	pub const ALL: [Operation; 1] = [Operation::Open];

	/// Number of slots in a profile's operation table.
	pub const COUNT: usize = Self::ALL.len();

	/// Slot of this operation in a profile's operation table.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Stable lowercase label, used in config files and on the command line.
	pub fn name(self) -> &'static str {
		match self {
			Operation::Open => "open",
		}
	}

	/// libc entry points an interception trampoline routes to this operation.
	pub fn symbols(self) -> &'static [&'static str] {
		match self {
			Operation::Open => &[
				"open", "open64", "openat", "openat64", "fopen", "fopen64", "creat",
			],
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl TryFrom<u32> for Operation {
	type Error = RedirectError;

	fn try_from(id: u32) -> Result<Self> {
		Operation::ALL
			.into_iter()
			.find(|op| *op as u32 == id)
			.ok_or_else(|| RedirectError::UnknownOperation { id: id.to_string() })
	}
}

impl FromStr for Operation {
	type Err = RedirectError;

	fn from_str(s: &str) -> Result<Self> {
		Operation::ALL
			.into_iter()
			.find(|op| op.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| RedirectError::UnknownOperation { id: s.to_string() })
	}
}
