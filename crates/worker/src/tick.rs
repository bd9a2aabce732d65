//! Single-owner task queue for game-state mutations.
//!
//! The thread that owns the game state calls [`TickQueue::tick`] once per
//! game tick. Any thread may submit work through a cloned [`TickScheduler`].
//! A task submitted while tick `t` is current runs during tick `t + delay`,
//! and never earlier than tick `t + 1`, so work scheduled from an event
//! handler always observes the state left behind by the rest of that tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::mpsc;

/// Boxed unit of work executed against the queue owner's state.
pub type TickTask<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

/// Returned when submitting to a queue whose owner has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tick queue is closed")]
pub struct TickQueueClosed;

struct Scheduled<S> {
	due: u64,
	seq: u64,
	task: TickTask<S>,
}

/// Cloneable, thread-safe submission port for a [`TickQueue`].
pub struct TickScheduler<S> {
	tx: mpsc::UnboundedSender<Scheduled<S>>,
	now: Arc<AtomicU64>,
	seq: Arc<AtomicU64>,
}

impl<S> Clone for TickScheduler<S> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
			now: Arc::clone(&self.now),
			seq: Arc::clone(&self.seq),
		}
	}
}

impl<S> std::fmt::Debug for TickScheduler<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TickScheduler")
			.field("now", &self.current_tick())
			.field("closed", &self.is_closed())
			.finish()
	}
}

impl<S> TickScheduler<S> {
	/// Runs `task` on the next tick.
	pub fn run_task<F>(&self, task: F) -> Result<(), TickQueueClosed>
	where
		F: FnOnce(&mut S) + Send + 'static,
	{
		self.run_task_later(1, task)
	}

	/// Runs `task` `delay` ticks from now. A delay of zero is treated as one.
	pub fn run_task_later<F>(&self, delay: u64, task: F) -> Result<(), TickQueueClosed>
	where
		F: FnOnce(&mut S) + Send + 'static,
	{
		let due = self.now.load(Ordering::Acquire).saturating_add(delay.max(1));
		let seq = self.seq.fetch_add(1, Ordering::Relaxed);
		self.tx
			.send(Scheduled {
				due,
				seq,
				task: Box::new(task),
			})
			.map_err(|_| TickQueueClosed)
	}

	/// Returns the tick the owner is currently processing (or last processed).
	pub fn current_tick(&self) -> u64 {
		self.now.load(Ordering::Acquire)
	}

	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

/// Outcome of one [`TickQueue::tick`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
	/// Tick number that was processed.
	pub tick: u64,
	/// Tasks executed during this tick.
	pub ran: usize,
	/// Tasks still waiting for a later tick.
	pub waiting: usize,
}

/// Owner side of the queue. Not shareable; lives on the game thread.
pub struct TickQueue<S> {
	rx: mpsc::UnboundedReceiver<Scheduled<S>>,
	pending: Vec<Scheduled<S>>,
	scheduler: TickScheduler<S>,
}

impl<S> Default for TickQueue<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S> TickQueue<S> {
	/// Creates an empty queue at tick zero.
	pub fn new() -> Self {
		let (tx, rx) = mpsc::unbounded_channel();
		Self {
			rx,
			pending: Vec::new(),
			scheduler: TickScheduler {
				tx,
				now: Arc::new(AtomicU64::new(0)),
				seq: Arc::new(AtomicU64::new(0)),
			},
		}
	}

	/// Returns a submission port for this queue.
	pub fn scheduler(&self) -> TickScheduler<S> {
		self.scheduler.clone()
	}

	pub fn current_tick(&self) -> u64 {
		self.scheduler.current_tick()
	}

	/// Number of submitted tasks that have not run yet.
	pub fn pending(&mut self) -> usize {
		self.collect();
		self.pending.len()
	}

	/// Advances to the next tick and runs every task that has come due, in
	/// submission order.
	///
	/// Tasks submitted while this tick runs are held for a later tick.
	pub fn tick(&mut self, state: &mut S) -> TickReport {
		self.collect();
		let now = self.scheduler.now.fetch_add(1, Ordering::AcqRel).wrapping_add(1);

		let (mut ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending).into_iter().partition(|s| s.due <= now);
		self.pending = waiting;
		ready.sort_by_key(|s| (s.due, s.seq));

		let ran = ready.len();
		for scheduled in ready {
			(scheduled.task)(state);
		}

		if ran > 0 {
			tracing::trace!(tick = now, ran, waiting = self.pending.len(), "tick.drain");
		}

		TickReport {
			tick: now,
			ran,
			waiting: self.pending.len(),
		}
	}

	fn collect(&mut self) {
		while let Ok(scheduled) = self.rx.try_recv() {
			self.pending.push(scheduled);
		}
	}
}

#[cfg(test)]
mod tests;
