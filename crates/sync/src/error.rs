//! Error types for the sync engine.

use nicktag_config::ConfigError;
use nicktag_primitives::{ExternalAccountId, PlayerId};
use nicktag_worker::{RuntimeUnavailable, TickQueueClosed};
use thiserror::Error;

use crate::command::CommandError;

/// Violations of the identity mapping's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// A persisted entry could not be parsed. Fatal at load.
	#[error("malformed mapping entry {entry:?}: {reason}")]
	MalformedEntry { entry: String, reason: &'static str },

	#[error("player {0} is already linked")]
	AlreadyLinked(PlayerId),

	#[error("player {0} is not linked")]
	NotLinked(PlayerId),

	#[error("account {account} is already linked to player {player}")]
	AccountLinkedElsewhere { account: ExternalAccountId, player: PlayerId },
}

/// Tag template does not contain exactly one insertion point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag template {template:?}: expected exactly one `%s`, found {found}")]
pub struct TemplateError {
	pub template: String,
	pub found: usize,
}

/// Writing the mapping to durable storage failed.
#[derive(Debug, Error)]
#[error("failed to persist player mapping: {0}")]
pub struct PersistError(#[source] pub Box<dyn std::error::Error + Send + Sync + 'static>);

impl From<ConfigError> for PersistError {
	fn from(err: ConfigError) -> Self {
		Self(Box::new(err))
	}
}

/// Top-level error for sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Template(#[from] TemplateError),

	#[error(transparent)]
	Persist(#[from] PersistError),

	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Command(#[from] CommandError),

	#[error("account {0} was not found")]
	AccountNotFound(ExternalAccountId),

	#[error("a link request for player {0} is already in progress")]
	LinkInProgress(PlayerId),

	#[error(transparent)]
	QueueClosed(#[from] TickQueueClosed),

	#[error(transparent)]
	Runtime(#[from] RuntimeUnavailable),
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
