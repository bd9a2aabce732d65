//! Orchestration of link state, name resolution and tag application.
//!
//! The controller lives on the game thread and is the only writer of the
//! identity mapping. Platform round-trips are spawned off-thread and their
//! results come back as tasks on the controller's own tick queue, so every
//! mutation below runs on the game thread.

use std::collections::HashSet;

use nicktag_primitives::{ExternalAccountId, PlayerId};
use nicktag_worker::{RuntimeUnavailable, TaskClass, TickScheduler};

use crate::apply::TagApplicator;
use crate::command::{CommandError, SyncCommand};
use crate::error::{PersistError, Result, StoreError, SyncError};
use crate::event::NameChange;
use crate::host::{CommandSender, GameHost};
use crate::persist::MappingSink;
use crate::resolve::ExternalNameResolver;
use crate::store::IdentityStore;

/// Prepended to every chat reply.
pub const REPLY_PREFIX: &str = "NickTag: ";

/// Tick queue type driving a controller.
pub type ControllerScheduler<H> = TickScheduler<SyncController<H>>;

pub struct SyncController<H: GameHost + 'static> {
	store: IdentityStore,
	applicator: TagApplicator,
	resolver: ExternalNameResolver,
	sink: Box<dyn MappingSink>,
	host: H,
	ticks: ControllerScheduler<H>,
	/// Players with a link request waiting on the platform.
	linking: HashSet<PlayerId>,
}

impl<H: GameHost + 'static> SyncController<H> {
	pub fn new(
		store: IdentityStore,
		applicator: TagApplicator,
		resolver: ExternalNameResolver,
		sink: Box<dyn MappingSink>,
		host: H,
		ticks: ControllerScheduler<H>,
	) -> Self {
		Self {
			store,
			applicator,
			resolver,
			sink,
			host,
			ticks,
			linking: HashSet::new(),
		}
	}

	pub fn store(&self) -> &IdentityStore {
		&self.store
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn applicator(&self) -> &TagApplicator {
		&self.applicator
	}

	pub(crate) fn into_host(self) -> H {
		self.host
	}

	/// Returns true while a link request for `player` is awaiting resolution.
	pub fn is_linking(&self, player: PlayerId) -> bool {
		self.linking.contains(&player)
	}

	/// Runs a player command, replying to the sender with the outcome.
	///
	/// `Ok` means the command was accepted; a link still completes
	/// asynchronously and reports its final result as a reply.
	pub fn execute<S: AsRef<str>>(&mut self, sender: CommandSender, args: &[S]) -> Result<()> {
		let CommandSender::Player(player) = sender else {
			tracing::debug!("command.rejected_console");
			return Err(CommandError::NotAPlayer.into());
		};
		let command = match SyncCommand::parse(args) {
			Ok(command) => command,
			Err(err) => {
				tracing::debug!(%player, error = %err, "command.parse_failed");
				self.reply(player, &err.to_string());
				return Err(err.into());
			}
		};
		match command {
			SyncCommand::Link(account) => self.link(player, account),
			SyncCommand::Unlink => self.unlink(player).map(|_| ()),
		}
	}

	/// Starts linking `player` to `account`.
	///
	/// Preconditions are checked immediately; the account's existence is
	/// checked off-thread and the link commits on a later tick.
	pub fn link(&mut self, player: PlayerId, account: ExternalAccountId) -> Result<()> {
		if let Err(err) = self.check_link(player, account) {
			tracing::debug!(%player, %account, error = %err, "link.rejected");
			self.reply_rejection(player, &err);
			return Err(err);
		}

		self.linking.insert(player);
		if let Err(err) = self.resolve_then(account, move |ctl, name| ctl.finish_link(player, account, name)) {
			self.linking.remove(&player);
			tracing::warn!(%player, %account, error = %err, "link.resolve_unavailable");
			self.reply(player, "Could not look up the account, please try again later.");
			return Err(err.into());
		}
		Ok(())
	}

	fn check_link(&self, player: PlayerId, account: ExternalAccountId) -> Result<()> {
		if self.linking.contains(&player) {
			return Err(SyncError::LinkInProgress(player));
		}
		Ok(self.store.check_link(player, account)?)
	}

	fn finish_link(&mut self, player: PlayerId, account: ExternalAccountId, name: Option<String>) {
		self.linking.remove(&player);

		let Some(name) = name else {
			tracing::debug!(%player, %account, "link.account_not_found");
			self.reply_rejection(player, &SyncError::AccountNotFound(account));
			return;
		};

		let snapshot = self.store.clone();
		if let Err(err) = self.store.link(player, account) {
			let err = SyncError::from(err);
			tracing::debug!(%player, %account, error = %err, "link.rejected");
			self.reply_rejection(player, &err);
			return;
		}
		if let Err(err) = self.persist() {
			self.store = snapshot;
			tracing::warn!(%player, %account, error = %err, "link.persist_failed");
			self.reply(player, "Could not save the link, please try again later.");
			return;
		}

		tracing::info!(%player, %account, "link.committed");
		self.reply(player, &format!("Your nickname is {name}"));
		let tag = self.applicator.render(&name);
		self.schedule_tag(player, tag);
		self.reply(player, &format!("{account} is now synchronized with your game account."));
	}

	/// Removes the link for `player` and clears their tag.
	pub fn unlink(&mut self, player: PlayerId) -> Result<ExternalAccountId> {
		let snapshot = self.store.clone();
		let account = match self.store.unlink(player) {
			Ok(account) => account,
			Err(err) => {
				let err = SyncError::from(err);
				tracing::debug!(%player, error = %err, "unlink.rejected");
				self.reply_rejection(player, &err);
				return Err(err);
			}
		};
		if let Err(err) = self.persist() {
			self.store = snapshot;
			tracing::warn!(%player, %account, error = %err, "unlink.persist_failed");
			self.reply(player, "Could not save the change, please try again later.");
			return Err(err.into());
		}

		tracing::info!(%player, %account, "unlink.committed");
		self.schedule_clear(player);
		self.reply(player, &format!("Your game account is no longer synchronized with {account}."));
		Ok(account)
	}

	/// Refreshes a joining player's tag from the platform.
	///
	/// Unlinked players cost nothing; unknown accounts are skipped silently.
	pub fn on_player_join(&mut self, player: PlayerId) {
		let Some(account) = self.store.lookup(player) else {
			return;
		};
		let scheduled = self.resolve_then(account, move |ctl, name| {
			let Some(name) = name else {
				tracing::debug!(%player, %account, "join.account_not_found");
				return;
			};
			// The link may have been removed while the lookup was in flight.
			if ctl.store.lookup(player) != Some(account) {
				return;
			}
			let tag = ctl.applicator.render(&name);
			ctl.schedule_tag(player, tag);
		});
		if let Err(err) = scheduled {
			tracing::warn!(%player, %account, error = %err, "join.resolve_unavailable");
		}
	}

	/// Propagates a platform-side name change to the linked online player.
	pub fn on_external_name_changed(&mut self, change: NameChange) {
		if change.is_bot {
			tracing::trace!(account = %change.account, "name_change.ignored_bot");
			return;
		}
		let Some(player) = self.store.find_player(change.account) else {
			return;
		};
		if !self.host.is_online(player) {
			tracing::debug!(%player, account = %change.account, "name_change.player_offline");
			return;
		}

		let tag = self.applicator.render(&change.new_name);
		self.schedule_tag(player, tag);
		if let Err(err) = self.persist() {
			tracing::warn!(%player, error = %err, "name_change.persist_failed");
		}
		self.reply(player, &format!("Your nickname tag has been updated to {}", change.new_name));
	}

	/// Resolves `account` off the game thread and hands the result to `then`
	/// on a later tick.
	///
	/// Once this returns `Ok`, `then` is queued exactly once, with `None` if the
	/// client panicked.
	fn resolve_then<F>(&self, account: ExternalAccountId, then: F) -> std::result::Result<(), RuntimeUnavailable>
	where
		F: FnOnce(&mut Self, Option<String>) + Send + 'static,
	{
		let resolver = self.resolver.clone();
		let ticks = self.ticks.clone();
		nicktag_worker::spawn(TaskClass::Resolve, async move {
			// The client runs in its own task so a panic comes back as a join error.
			let lookup = nicktag_worker::spawn(TaskClass::Resolve, async move { resolver.resolve(account).await });
			let name = match lookup {
				Ok(task) => task.await.unwrap_or_else(|err| {
					tracing::warn!(%account, error = %err, "resolve.lookup_failed");
					None
				}),
				Err(err) => {
					tracing::warn!(%account, error = %err, "resolve.lookup_failed");
					None
				}
			};
			if ticks.run_task(move |ctl: &mut Self| then(ctl, name)).is_err() {
				tracing::warn!(%account, "resolve.queue_closed");
			}
		})
		.map(drop)
	}

	/// Applies `tag` on the next tick, after the host has finished its own
	/// name initialization for the current one.
	fn schedule_tag(&self, player: PlayerId, tag: String) {
		let scheduled = self.ticks.run_task(move |ctl: &mut Self| {
			if ctl.host.is_online(player) {
				ctl.applicator.apply(&mut ctl.host, player, &tag);
			}
		});
		if scheduled.is_err() {
			tracing::warn!(%player, "apply.queue_closed");
		}
	}

	fn schedule_clear(&self, player: PlayerId) {
		let scheduled = self.ticks.run_task(move |ctl: &mut Self| {
			if ctl.host.is_online(player) {
				ctl.applicator.clear(&mut ctl.host, player);
			}
		});
		if scheduled.is_err() {
			tracing::warn!(%player, "clear.queue_closed");
		}
	}

	fn persist(&mut self) -> std::result::Result<(), PersistError> {
		self.sink.save(&self.store.serialize())
	}

	fn reply(&mut self, player: PlayerId, message: &str) {
		if self.host.is_online(player) {
			self.host.send_message(player, &format!("{REPLY_PREFIX}{message}"));
		}
	}

	fn reply_rejection(&mut self, player: PlayerId, err: &SyncError) {
		let message = match err {
			SyncError::Store(StoreError::AlreadyLinked(_)) => match self.store.lookup(player) {
				Some(account) => format!("You are already linked to {account}. Run unlink first."),
				None => "You are already linked. Run unlink first.".to_string(),
			},
			SyncError::Store(StoreError::NotLinked(_)) => "You are not linked to any account.".to_string(),
			SyncError::Store(StoreError::AccountLinkedElsewhere { account, .. }) => {
				format!("{account} is already linked to another player.")
			}
			SyncError::AccountNotFound(account) => format!("No found user {account}"),
			SyncError::LinkInProgress(_) => "A link request is already in progress.".to_string(),
			other => other.to_string(),
		};
		self.reply(player, &message);
	}
}
