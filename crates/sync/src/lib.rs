//! Keeps a player's in-game name tag in step with their display name on an
//! external messaging platform.
//!
//! * [`IdentityStore`]: the player to account mapping and its persisted form
//! * [`TagTemplate`]: renders a display name into a decorated tag
//! * [`TagApplicator`]: writes tags into the host's prefix/suffix slots
//! * [`ExternalNameResolver`]: looks up an account's current name
//! * [`SyncController`]: reacts to joins, platform name changes and commands
//! * [`SyncService`]: owns the controller and its tick queue for one run
//!
//! The host drives everything from its game thread by calling
//! [`SyncService::tick`] once per tick. Platform events arrive on other
//! threads and are marshaled through a [`SyncHandle`].

pub mod apply;
pub mod command;
pub mod controller;
pub mod error;
pub mod event;
pub mod format;
pub mod host;
pub mod persist;
pub mod resolve;
pub mod service;
pub mod store;

pub use apply::{TagApplicator, TagConfig};
pub use command::{CommandError, SyncCommand};
pub use controller::SyncController;
pub use error::{PersistError, Result, StoreError, SyncError, TemplateError};
pub use event::NameChange;
pub use format::{TagTemplate, format};
pub use host::{CommandSender, GameHost, Players, Presentation};
pub use nicktag_primitives::{ExternalAccountId, PlayerId, TagPosition};
pub use persist::MappingSink;
pub use resolve::{BlockingClient, ExternalNameResolver, PlatformClient};
pub use service::{SyncHandle, SyncService};
pub use store::{IdentityLink, IdentityStore};
