//! Durable storage for the serialized mapping.

use nicktag_config::ConfigFile;

use crate::error::PersistError;

/// Receives the full serialized mapping after every mutation.
///
/// Writes are synchronous and replace whatever was stored before.
pub trait MappingSink {
	fn save(&mut self, entries: &[String]) -> Result<(), PersistError>;
}

impl MappingSink for ConfigFile {
	fn save(&mut self, entries: &[String]) -> Result<(), PersistError> {
		Ok(self.write_players(entries)?)
	}
}

impl<T: MappingSink + ?Sized> MappingSink for Box<T> {
	fn save(&mut self, entries: &[String]) -> Result<(), PersistError> {
		(**self).save(entries)
	}
}
