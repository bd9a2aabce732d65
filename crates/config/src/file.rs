//! File-backed configuration with player-list writeback.

use std::path::{Path, PathBuf};

use crate::{Config, ConfigError, Result};

/// Handle to the on-disk config file.
///
/// Writes replace only the `players` key; everything else in the file (the
/// token, tag settings, unknown keys) is carried over untouched.
#[derive(Debug, Clone)]
pub struct ConfigFile {
	path: PathBuf,
}

impl ConfigFile {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads and parses the file.
	pub fn load(&self) -> Result<Config> {
		Config::load(&self.path)
	}

	/// Overwrites the `players` list with `players`, in the given order.
	///
	/// Other keys are kept. The document is written to a sibling temp file
	/// and renamed into place.
	pub fn write_players(&self, players: &[String]) -> Result<()> {
		let mut table = match std::fs::read_to_string(&self.path) {
			Ok(content) => toml::from_str::<toml::Table>(&content)?,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
			Err(e) => return Err(self.io_error(e)),
		};

		let list = players.iter().cloned().map(toml::Value::String).collect();
		table.insert("players".to_string(), toml::Value::Array(list));
		let rendered = toml::to_string(&table)?;

		let tmp = self.path.with_extension("toml.tmp");
		std::fs::write(&tmp, rendered).map_err(|e| ConfigError::Io { path: tmp.clone(), error: e })?;
		std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

		tracing::debug!(path = %self.path.display(), players = players.len(), "config.players_written");
		Ok(())
	}

	fn io_error(&self, error: std::io::Error) -> ConfigError {
		ConfigError::Io {
			path: self.path.clone(),
			error,
		}
	}
}
