use std::fmt;
use std::str::FromStr;

/// Which name slot a tag is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagPosition {
	/// Rendered before the player's name.
	Prefix,
	/// Rendered after the player's name.
	#[default]
	Suffix,
}

impl TagPosition {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Prefix => "prefix",
			Self::Suffix => "suffix",
		}
	}
}

impl fmt::Display for TagPosition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TagPosition {
	type Err = String;

	/// Parses case-insensitively, so both `SUFFIX` and `suffix` are accepted.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"prefix" => Ok(Self::Prefix),
			"suffix" => Ok(Self::Suffix),
			_ => Err(s.to_string()),
		}
	}
}
