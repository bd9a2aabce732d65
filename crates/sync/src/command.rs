//! The `link` / `unlink` command surface.

use nicktag_primitives::ExternalAccountId;
use thiserror::Error;

/// Usage line shown when a command cannot be parsed.
pub const USAGE: &str = "Usage: /nicktag link <accountId> | /nicktag unlink";

/// A parsed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCommand {
	Link(ExternalAccountId),
	Unlink,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	#[error("{}", USAGE)]
	Usage,
	#[error("only players can run this command")]
	NotAPlayer,
	#[error("invalid account id: {0}")]
	InvalidAccountId(String),
}

impl SyncCommand {
	/// Parses command arguments (without the command label).
	///
	/// A lone numeric argument is accepted as shorthand for `link <id>`.
	pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, CommandError> {
		let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
		match args.as_slice() {
			[verb, id] if verb.eq_ignore_ascii_case("link") => parse_account(id),
			[verb] if verb.eq_ignore_ascii_case("unlink") => Ok(Self::Unlink),
			[id] if id.starts_with(|c: char| c.is_ascii_digit()) => parse_account(id),
			_ => Err(CommandError::Usage),
		}
	}
}

fn parse_account(raw: &str) -> Result<SyncCommand, CommandError> {
	raw.parse()
		.map(SyncCommand::Link)
		.map_err(|_| CommandError::InvalidAccountId(raw.to_string()))
}
