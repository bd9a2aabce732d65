/// Execution classes used to label spawned work in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Async round-trips to the messaging platform.
	Resolve,
	/// Long-lived forwarding of platform events onto the tick queue.
	EventPump,
	/// Blocking platform lookups executed on the blocking pool.
	IoBlocking,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Resolve => "resolve",
			Self::EventPump => "event_pump",
			Self::IoBlocking => "io_blocking",
		}
	}
}
