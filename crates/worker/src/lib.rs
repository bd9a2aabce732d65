//! Task primitives for work that must stay off, or be marshaled onto, the
//! game thread.
//!
//! * [`spawn`] / [`spawn_blocking`]: run async or blocking work on the shared runtime
//! * [`TickQueue`] / [`TickScheduler`]: the single-owner queue drained once per game tick

mod class;
mod spawn;
pub mod tick;

pub use class::TaskClass;
pub use spawn::{RuntimeUnavailable, spawn, spawn_blocking};
pub use tick::{TickQueue, TickQueueClosed, TickReport, TickScheduler, TickTask};
