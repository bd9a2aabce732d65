//! Error types for configuration loading and writeback.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Error rendering the config back to TOML.
	#[error("TOML serialize error: {0}")]
	Serialize(#[from] toml::ser::Error),

	/// Error reading or writing a configuration file.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path to the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A required field is missing or empty.
	#[error("missing required field: {0}")]
	MissingField(&'static str),

	/// `tag.position` is neither prefix nor suffix.
	#[error("invalid tag position: {0:?} (expected 'prefix' or 'suffix')")]
	InvalidPosition(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
