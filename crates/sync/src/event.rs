use nicktag_primitives::ExternalAccountId;

/// A member's effective name changed on the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameChange {
	pub account: ExternalAccountId,
	pub new_name: String,
	/// Service accounts never carry a linked player and are ignored.
	pub is_bot: bool,
}

impl NameChange {
	pub fn new(account: impl Into<ExternalAccountId>, new_name: impl Into<String>) -> Self {
		Self {
			account: account.into(),
			new_name: new_name.into(),
			is_bot: false,
		}
	}

	#[must_use]
	pub fn from_bot(mut self) -> Self {
		self.is_bot = true;
		self
	}
}
