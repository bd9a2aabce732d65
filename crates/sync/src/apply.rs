//! Writing rendered tags into a player's name slots.

use nicktag_config::TagSettings;
use nicktag_primitives::{PlayerId, TagPosition};

use crate::error::TemplateError;
use crate::format::TagTemplate;
use crate::host::GameHost;

/// Validated tag settings. Immutable once the service has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConfig {
	pub position: TagPosition,
	pub template: TagTemplate,
	pub mirror_display_name: bool,
}

impl TagConfig {
	pub fn from_settings(settings: &TagSettings) -> Result<Self, TemplateError> {
		Ok(Self {
			position: settings.position,
			template: TagTemplate::parse(settings.format.as_str())?,
			mirror_display_name: settings.display_name_enabled,
		})
	}
}

/// Applies rendered tags to the configured slot.
///
/// Callers are responsible for running this one tick after the triggering
/// event; the host initializes a joining player's name slots during the join
/// tick and would overwrite anything written earlier.
#[derive(Debug, Clone)]
pub struct TagApplicator {
	config: TagConfig,
}

impl TagApplicator {
	pub fn new(config: TagConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &TagConfig {
		&self.config
	}

	/// Renders `name` through the configured template.
	pub fn render(&self, name: &str) -> String {
		self.config.template.format(name)
	}

	/// Writes `tag` into the configured slot and refreshes the mirrored
	/// display name. Applying the same tag twice leaves the same state.
	pub fn apply<H: GameHost + ?Sized>(&self, host: &mut H, player: PlayerId, tag: &str) {
		match self.config.position {
			TagPosition::Prefix => host.set_prefix(player, tag),
			TagPosition::Suffix => host.set_suffix(player, tag),
		}
		if self.config.mirror_display_name {
			mirror_display_name(host, player);
		}
	}

	/// Empties the configured slot.
	pub fn clear<H: GameHost + ?Sized>(&self, host: &mut H, player: PlayerId) {
		self.apply(host, player, "");
	}
}

/// Rebuilds the display name from the slots as the host currently holds them,
/// so decorations written by other plugins are kept and nothing accumulates.
fn mirror_display_name<H: GameHost + ?Sized>(host: &mut H, player: PlayerId) {
	let Some(name) = host.name(player) else {
		return;
	};
	let display = format!("{}{}{}", host.prefix(player), name, host.suffix(player));
	host.set_display_name(player, &display);
}
