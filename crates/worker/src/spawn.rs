use std::future::Future;
use std::sync::OnceLock;

use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::TaskClass;

/// The shared runtime could not be built, so no work can be spawned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("worker runtime unavailable: {0}")]
pub struct RuntimeUnavailable(String);

/// Returns the ambient runtime, or a lazily built shared one when the caller
/// (typically a game thread) is not inside a tokio context.
///
/// A failed build is remembered; later calls report the same error.
fn runtime_handle() -> Result<Handle, RuntimeUnavailable> {
	if let Ok(handle) = Handle::try_current() {
		return Ok(handle);
	}

	static GLOBAL_RT: OnceLock<Result<Runtime, RuntimeUnavailable>> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("nicktag-worker")
			.build()
			.map_err(|err| {
				tracing::error!(error = %err, "worker.runtime_build_failed");
				RuntimeUnavailable(err.to_string())
			})
	});
	runtime.as_ref().map(|rt| rt.handle().clone()).map_err(Clone::clone)
}

/// Spawns an async task labelled with `class`.
pub fn spawn<F>(class: TaskClass, fut: F) -> Result<JoinHandle<F::Output>, RuntimeUnavailable>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	let handle = runtime_handle()?;
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	Ok(handle.spawn(fut))
}

/// Runs blocking work on the runtime's blocking pool.
pub fn spawn_blocking<F, R>(class: TaskClass, f: F) -> Result<JoinHandle<R>, RuntimeUnavailable>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	let handle = runtime_handle()?;
	tracing::trace!(worker_class = class.as_str(), "worker.spawn_blocking");
	Ok(handle.spawn_blocking(f))
}
