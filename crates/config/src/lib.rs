//! Configuration for nicktag.
//!
//! Configuration is a single TOML file:
//!
//! ```toml
//! players = ["0f8fad5b-d9cb-469f-a165-70867728950e:123456789012345678"]
//!
//! [discord]
//! token = "..."
//! server_id = "987654321098765432"
//!
//! [tag]
//! position = "suffix"          # or "prefix", any case
//! format = " &r(%s)"
//! display_name_enabled = true
//! ```
//!
//! Only `discord.token` and `discord.server_id` are required; the tag section
//! falls back to the defaults shown above. The `players` list is owned by the
//! sync engine and rewritten through [`ConfigFile::write_players`].

pub mod error;
pub mod file;

use std::path::Path;

use nicktag_primitives::TagPosition;
use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use file::ConfigFile;

/// Default tag template when `tag.format` is absent.
pub const DEFAULT_FORMAT: &str = " &r(%s)";

/// Parsed and checked configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Messaging platform connection settings.
	pub discord: DiscordConfig,
	/// Tag rendering settings. The template is validated by the sync engine.
	pub tag: TagSettings,
	/// Serialized `player:account` links, in file order.
	pub players: Vec<String>,
}

/// Messaging platform connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DiscordConfig {
	pub token: String,
	pub server_id: String,
}

impl std::fmt::Debug for DiscordConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DiscordConfig")
			.field("token", &"<redacted>")
			.field("server_id", &self.server_id)
			.finish()
	}
}

/// Raw tag settings as read from the `[tag]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSettings {
	pub position: TagPosition,
	pub format: String,
	pub display_name_enabled: bool,
}

impl Default for TagSettings {
	fn default() -> Self {
		Self {
			position: TagPosition::Suffix,
			format: DEFAULT_FORMAT.to_string(),
			display_name_enabled: true,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	discord: RawDiscord,
	tag: RawTag,
	players: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDiscord {
	token: Option<String>,
	server_id: Option<Snowflake>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTag {
	position: Option<String>,
	format: Option<String>,
	display_name_enabled: Option<bool>,
}

/// Server ids are often written unquoted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Snowflake {
	Text(String),
	Number(u64),
}

impl Snowflake {
	fn into_string(self) -> String {
		match self {
			Self::Text(s) => s,
			Self::Number(n) => n.to_string(),
		}
	}
}

impl Config {
	/// Parse a TOML string into a [`Config`].
	pub fn parse(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;

		let token = raw.discord.token.filter(|t| !t.trim().is_empty()).ok_or(ConfigError::MissingField("discord.token"))?;
		let server_id = raw
			.discord
			.server_id
			.map(Snowflake::into_string)
			.filter(|s| !s.trim().is_empty())
			.ok_or(ConfigError::MissingField("discord.server_id"))?;

		let defaults = TagSettings::default();
		let position = match raw.tag.position {
			Some(p) => p.parse::<TagPosition>().map_err(ConfigError::InvalidPosition)?,
			None => defaults.position,
		};

		Ok(Config {
			discord: DiscordConfig { token, server_id },
			tag: TagSettings {
				position,
				format: raw.tag.format.unwrap_or(defaults.format),
				display_name_enabled: raw.tag.display_name_enabled.unwrap_or(defaults.display_name_enabled),
			},
			players: raw.players,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}
}
