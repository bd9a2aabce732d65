//! Seams to the game server hosting the sync engine.
//!
//! All methods are called on the game thread only.

use nicktag_primitives::PlayerId;

/// Name-slot storage owned by the host's nametag subsystem.
pub trait Presentation {
	fn prefix(&self, player: PlayerId) -> String;
	fn suffix(&self, player: PlayerId) -> String;
	fn set_prefix(&mut self, player: PlayerId, text: &str);
	fn set_suffix(&mut self, player: PlayerId, text: &str);
	fn set_display_name(&mut self, player: PlayerId, text: &str);
}

/// Online-player directory and chat replies.
pub trait Players {
	fn is_online(&self, player: PlayerId) -> bool;

	/// The player's undecorated name, or `None` when offline.
	fn name(&self, player: PlayerId) -> Option<String>;

	fn send_message(&mut self, player: PlayerId, message: &str);
}

/// Everything the controller needs from the host.
pub trait GameHost: Presentation + Players {}

impl<T: Presentation + Players> GameHost for T {}

/// Who issued a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSender {
	Player(PlayerId),
	Console,
}
