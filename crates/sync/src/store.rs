//! The player to external account mapping.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use nicktag_primitives::{ExternalAccountId, PlayerId};

use crate::error::StoreError;

/// Separator between the two halves of a persisted entry.
pub const ENTRY_SEPARATOR: char = ':';

/// One active association between a player and an external account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityLink {
	pub player: PlayerId,
	pub account: ExternalAccountId,
}

impl fmt::Display for IdentityLink {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{ENTRY_SEPARATOR}{}", self.player, self.account)
	}
}

impl FromStr for IdentityLink {
	type Err = StoreError;

	fn from_str(entry: &str) -> Result<Self, Self::Err> {
		let malformed = |reason| StoreError::MalformedEntry {
			entry: entry.to_string(),
			reason,
		};
		let (player, account) = entry.split_once(ENTRY_SEPARATOR).ok_or_else(|| malformed("missing ':' separator"))?;
		Ok(Self {
			player: player.parse().map_err(|_| malformed("player id is not a UUID"))?,
			account: account.parse().map_err(|_| malformed("account id is not an unsigned 64-bit integer"))?,
		})
	}
}

/// Mapping keyed by player, preserving insertion order for stable writeback.
///
/// Each player maps to at most one account and each account to at most one
/// player. Reverse lookups scan linearly; the mapping holds tens of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityStore {
	links: IndexMap<PlayerId, ExternalAccountId>,
}

impl IdentityStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a store from persisted `player:account` entries.
	///
	/// Any malformed or duplicate entry aborts the whole load.
	pub fn load<I>(raw: I) -> Result<Self, StoreError>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut store = Self::new();
		for entry in raw {
			let entry = entry.as_ref();
			let link: IdentityLink = entry.parse()?;
			store.link(link.player, link.account).map_err(|err| StoreError::MalformedEntry {
				entry: entry.to_string(),
				reason: match err {
					StoreError::AlreadyLinked(_) => "duplicate player id",
					_ => "duplicate account id",
				},
			})?;
		}
		Ok(store)
	}

	/// Checks whether `player` could be linked to `account` without mutating.
	pub fn check_link(&self, player: PlayerId, account: ExternalAccountId) -> Result<(), StoreError> {
		if self.links.contains_key(&player) {
			return Err(StoreError::AlreadyLinked(player));
		}
		if let Some(owner) = self.find_player(account) {
			return Err(StoreError::AccountLinkedElsewhere { account, player: owner });
		}
		Ok(())
	}

	/// Links `player` to `account`. Never overwrites an existing link.
	pub fn link(&mut self, player: PlayerId, account: ExternalAccountId) -> Result<(), StoreError> {
		self.check_link(player, account)?;
		self.links.insert(player, account);
		Ok(())
	}

	/// Removes the link for `player`, returning the account it pointed to.
	pub fn unlink(&mut self, player: PlayerId) -> Result<ExternalAccountId, StoreError> {
		self.links.shift_remove(&player).ok_or(StoreError::NotLinked(player))
	}

	pub fn lookup(&self, player: PlayerId) -> Option<ExternalAccountId> {
		self.links.get(&player).copied()
	}

	/// Reverse lookup by account.
	pub fn find_player(&self, account: ExternalAccountId) -> Option<PlayerId> {
		self.links.iter().find(|(_, a)| **a == account).map(|(p, _)| *p)
	}

	pub fn iter(&self) -> impl Iterator<Item = IdentityLink> + '_ {
		self.links.iter().map(|(&player, &account)| IdentityLink { player, account })
	}

	pub fn len(&self) -> usize {
		self.links.len()
	}

	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	/// Renders the full mapping in persisted form.
	pub fn serialize(&self) -> Vec<String> {
		self.iter().map(|link| link.to_string()).collect()
	}
}

#[cfg(test)]
mod tests;
