#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use nicktag_config::{Config, DiscordConfig, TagSettings};
use nicktag_sync::{
	ExternalAccountId, MappingSink, PersistError, PlatformClient, PlayerId, Players, Presentation, SyncService, TagPosition,
};
use parking_lot::Mutex;

pub const P1: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
pub const P2: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

pub fn p1() -> PlayerId {
	P1.parse().expect("test uuid")
}

pub fn p2() -> PlayerId {
	P2.parse().expect("test uuid")
}

#[derive(Debug, Default, Clone)]
pub struct FakePlayer {
	pub name: String,
	pub online: bool,
	pub prefix: String,
	pub suffix: String,
	pub display_name: Option<String>,
	pub messages: Vec<String>,
}

/// In-memory stand-in for the game server's player list and nametag plugin.
#[derive(Debug, Default)]
pub struct FakeHost {
	pub players: HashMap<PlayerId, FakePlayer>,
}

impl FakeHost {
	pub fn join(&mut self, player: PlayerId, name: &str) {
		let entry = self.players.entry(player).or_default();
		entry.name = name.to_string();
		entry.online = true;
	}

	pub fn leave(&mut self, player: PlayerId) {
		if let Some(entry) = self.players.get_mut(&player) {
			entry.online = false;
		}
	}

	pub fn player(&self, player: PlayerId) -> FakePlayer {
		self.players.get(&player).cloned().unwrap_or_default()
	}
}

impl Presentation for FakeHost {
	fn prefix(&self, player: PlayerId) -> String {
		self.player(player).prefix
	}

	fn suffix(&self, player: PlayerId) -> String {
		self.player(player).suffix
	}

	fn set_prefix(&mut self, player: PlayerId, text: &str) {
		self.players.entry(player).or_default().prefix = text.to_string();
	}

	fn set_suffix(&mut self, player: PlayerId, text: &str) {
		self.players.entry(player).or_default().suffix = text.to_string();
	}

	fn set_display_name(&mut self, player: PlayerId, text: &str) {
		self.players.entry(player).or_default().display_name = Some(text.to_string());
	}
}

impl Players for FakeHost {
	fn is_online(&self, player: PlayerId) -> bool {
		self.players.get(&player).is_some_and(|p| p.online)
	}

	fn name(&self, player: PlayerId) -> Option<String> {
		self.players.get(&player).filter(|p| p.online).map(|p| p.name.clone())
	}

	fn send_message(&mut self, player: PlayerId, message: &str) {
		self.players.entry(player).or_default().messages.push(message.to_string());
	}
}

/// Platform client answering from a fixed member table; can be switched to
/// panic mid-lookup.
#[derive(Default)]
pub struct FakeClient {
	names: Mutex<HashMap<ExternalAccountId, String>>,
	calls: AtomicUsize,
	panics: AtomicBool,
}

impl FakeClient {
	pub fn with_names(names: &[(u64, &str)]) -> Self {
		Self {
			names: Mutex::new(names.iter().map(|(id, name)| (ExternalAccountId(*id), name.to_string())).collect()),
			calls: AtomicUsize::new(0),
			panics: AtomicBool::new(false),
		}
	}

	pub fn set_panicking(&self, panics: bool) {
		self.panics.store(panics, Ordering::SeqCst);
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PlatformClient for FakeClient {
	async fn account_name(&self, server_id: &str, account: ExternalAccountId) -> Option<String> {
		assert_eq!(server_id, "guild-1");
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.panics.load(Ordering::SeqCst) {
			panic!("platform client crashed looking up {account}");
		}
		self.names.lock().get(&account).cloned()
	}
}

/// Sink recording every full-mapping write; can be switched to fail.
#[derive(Clone, Default)]
pub struct RecordingSink {
	writes: Arc<Mutex<Vec<Vec<String>>>>,
	fail: Arc<AtomicBool>,
}

impl RecordingSink {
	pub fn writes(&self) -> usize {
		self.writes.lock().len()
	}

	pub fn last(&self) -> Option<Vec<String>> {
		self.writes.lock().last().cloned()
	}

	pub fn set_failing(&self, fail: bool) {
		self.fail.store(fail, Ordering::SeqCst);
	}
}

impl MappingSink for RecordingSink {
	fn save(&mut self, entries: &[String]) -> Result<(), PersistError> {
		if self.fail.load(Ordering::SeqCst) {
			return Err(PersistError(Box::new(std::io::Error::other("disk full"))));
		}
		self.writes.lock().push(entries.to_vec());
		Ok(())
	}
}

pub fn config(players: &[String]) -> Config {
	Config {
		discord: DiscordConfig {
			token: "token".to_string(),
			server_id: "guild-1".to_string(),
		},
		tag: TagSettings {
			position: TagPosition::Suffix,
			format: " (%s)".to_string(),
			display_name_enabled: true,
		},
		players: players.to_vec(),
	}
}

pub struct Harness {
	pub service: SyncService<FakeHost>,
	pub client: Arc<FakeClient>,
	pub sink: RecordingSink,
}

impl Harness {
	pub fn new(players: &[String], names: &[(u64, &str)]) -> Self {
		Self::with_config(config(players), names)
	}

	pub fn with_config(config: Config, names: &[(u64, &str)]) -> Self {
		let _ = tracing_subscriber::fmt::try_init();
		let client = Arc::new(FakeClient::with_names(names));
		let sink = RecordingSink::default();
		let service = SyncService::start(&config, client.clone(), FakeHost::default(), sink.clone()).expect("service starts");
		Self { service, client, sink }
	}

	pub fn host(&self) -> &FakeHost {
		self.service.controller().host()
	}

	pub fn host_mut(&mut self) -> &mut FakeHost {
		self.service.controller_mut().host_mut()
	}

	/// Lets spawned lookups finish and drains the resulting ticks.
	pub async fn settle(&mut self) {
		for _ in 0..16 {
			tokio::task::yield_now().await;
			self.service.tick();
		}
	}
}
