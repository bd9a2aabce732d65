use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Stable identifier for a player on the local game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
	/// Generates a fresh random player id.
	pub fn new_v4() -> Self {
		Self(Uuid::new_v4())
	}

	pub const fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl From<Uuid> for PlayerId {
	fn from(uuid: Uuid) -> Self {
		Self(uuid)
	}
}

impl fmt::Display for PlayerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0.hyphenated(), f)
	}
}

impl FromStr for PlayerId {
	type Err = IdParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Uuid::parse_str(s.trim()).map(Self).map_err(|_| IdParseError::Player(s.to_string()))
	}
}

/// Account identifier on the external messaging platform.
///
/// Platform snowflakes are unsigned 64-bit integers; negative or non-numeric
/// input is rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExternalAccountId(pub u64);

impl ExternalAccountId {
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl From<u64> for ExternalAccountId {
	fn from(id: u64) -> Self {
		Self(id)
	}
}

impl fmt::Display for ExternalAccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for ExternalAccountId {
	type Err = IdParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		s.trim().parse::<u64>().map(Self).map_err(|_| IdParseError::Account(s.to_string()))
	}
}

/// Failure to parse an identifier from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
	#[error("invalid player id: {0:?}")]
	Player(String),
	#[error("invalid account id: {0:?}")]
	Account(String),
}
