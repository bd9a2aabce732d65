//! Start/stop lifecycle for the sync engine.

use std::sync::Arc;

use nicktag_config::Config;
use nicktag_primitives::PlayerId;
use nicktag_worker::{RuntimeUnavailable, TaskClass, TickQueue, TickQueueClosed, TickReport};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::apply::{TagApplicator, TagConfig};
use crate::controller::{ControllerScheduler, SyncController};
use crate::error::Result;
use crate::event::NameChange;
use crate::host::{CommandSender, GameHost};
use crate::persist::MappingSink;
use crate::resolve::{ExternalNameResolver, PlatformClient};
use crate::store::IdentityStore;

/// Owned context for one running instance of the sync engine.
///
/// Created when the host enables the feature and consumed by [`Self::stop`].
/// The host calls [`Self::tick`] once per game tick from its game thread.
pub struct SyncService<H: GameHost + 'static> {
	controller: SyncController<H>,
	queue: TickQueue<SyncController<H>>,
	pump: Option<EventPump>,
}

impl<H: GameHost + 'static> SyncService<H> {
	/// Validates the configuration and builds the controller.
	///
	/// A malformed persisted mapping or an invalid tag template refuses to
	/// start rather than running with partial state.
	pub fn start<S>(config: &Config, client: Arc<dyn PlatformClient>, host: H, sink: S) -> Result<Self>
	where
		S: MappingSink + 'static,
	{
		let tag = TagConfig::from_settings(&config.tag)?;
		let store = IdentityStore::load(&config.players)?;
		let queue = TickQueue::new();
		let resolver = ExternalNameResolver::new(client, config.discord.server_id.as_str());

		tracing::info!(
			links = store.len(),
			position = %tag.position,
			mirror = tag.mirror_display_name,
			"sync.started"
		);

		let controller = SyncController::new(store, TagApplicator::new(tag), resolver, Box::new(sink), host, queue.scheduler());
		Ok(Self {
			controller,
			queue,
			pump: None,
		})
	}

	/// Returns a thread-safe handle for submitting platform events.
	pub fn handle(&self) -> SyncHandle<H> {
		SyncHandle {
			ticks: self.queue.scheduler(),
		}
	}

	/// Forwards platform name-change events onto the game thread until the
	/// channel closes or the service stops. Replaces any previous listener.
	pub fn listen(&mut self, events: mpsc::Receiver<NameChange>) -> Result<()> {
		self.pump = Some(EventPump::spawn(self.handle(), events)?);
		Ok(())
	}

	/// Drains one tick of queued work. Call from the game thread.
	pub fn tick(&mut self) -> TickReport {
		self.queue.tick(&mut self.controller)
	}

	pub fn on_player_join(&mut self, player: PlayerId) {
		self.controller.on_player_join(player);
	}

	pub fn execute<S: AsRef<str>>(&mut self, sender: CommandSender, args: &[S]) -> Result<()> {
		self.controller.execute(sender, args)
	}

	pub fn controller(&self) -> &SyncController<H> {
		&self.controller
	}

	pub fn controller_mut(&mut self) -> &mut SyncController<H> {
		&mut self.controller
	}

	/// Stops the event listener and hands the host back. Work still queued is
	/// dropped; no offline queue is kept.
	pub fn stop(self) -> H {
		drop(self.pump);
		tracing::info!(links = self.controller.store().len(), "sync.stopped");
		self.controller.into_host()
	}
}

/// Cloneable, `Send` handle that marshals platform events onto the game
/// thread.
pub struct SyncHandle<H: GameHost + 'static> {
	ticks: ControllerScheduler<H>,
}

impl<H: GameHost + 'static> Clone for SyncHandle<H> {
	fn clone(&self) -> Self {
		Self {
			ticks: self.ticks.clone(),
		}
	}
}

impl<H: GameHost + 'static> SyncHandle<H> {
	/// Queues a name change for the next tick.
	pub fn name_changed(&self, change: NameChange) -> std::result::Result<(), TickQueueClosed> {
		self.ticks.run_task(move |ctl: &mut SyncController<H>| ctl.on_external_name_changed(change))
	}

	/// Queues a join refresh for hosts that observe joins off the game thread.
	pub fn player_joined(&self, player: PlayerId) -> std::result::Result<(), TickQueueClosed> {
		self.ticks.run_task(move |ctl: &mut SyncController<H>| ctl.on_player_join(player))
	}

	pub fn is_closed(&self) -> bool {
		self.ticks.is_closed()
	}
}

/// Background task pumping platform events into a [`SyncHandle`].
struct EventPump {
	cancel: CancellationToken,
	_task: JoinHandle<()>,
}

impl EventPump {
	fn spawn<H: GameHost + 'static>(
		handle: SyncHandle<H>,
		mut events: mpsc::Receiver<NameChange>,
	) -> std::result::Result<Self, RuntimeUnavailable> {
		let cancel = CancellationToken::new();
		let task_cancel = cancel.clone();
		let task = nicktag_worker::spawn(TaskClass::EventPump, async move {
			loop {
				let change = tokio::select! {
					biased;
					_ = task_cancel.cancelled() => break,
					maybe_change = events.recv() => {
						let Some(change) = maybe_change else {
							break;
						};
						change
					}
				};
				if handle.name_changed(change).is_err() {
					break;
				}
			}
			tracing::debug!("sync.event_pump_stopped");
		})?;
		Ok(Self { cancel, _task: task })
	}
}

impl Drop for EventPump {
	fn drop(&mut self) {
		self.cancel.cancel();
	}
}
