//! Lookups of an account's current effective name on the messaging platform.

use std::sync::Arc;

use async_trait::async_trait;
use nicktag_primitives::ExternalAccountId;
use nicktag_worker::TaskClass;

/// Connected messaging-platform client.
///
/// Implementations return `None` both when the account does not exist and
/// when the query fails; callers cannot tell the two apart.
#[async_trait]
pub trait PlatformClient: Send + Sync {
	async fn account_name(&self, server_id: &str, account: ExternalAccountId) -> Option<String>;
}

/// Resolves account names within the configured server.
#[derive(Clone)]
pub struct ExternalNameResolver {
	client: Arc<dyn PlatformClient>,
	server_id: Arc<str>,
}

impl std::fmt::Debug for ExternalNameResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ExternalNameResolver").field("server_id", &self.server_id).finish_non_exhaustive()
	}
}

impl ExternalNameResolver {
	pub fn new(client: Arc<dyn PlatformClient>, server_id: impl Into<Arc<str>>) -> Self {
		Self {
			client,
			server_id: server_id.into(),
		}
	}

	pub fn server_id(&self) -> &str {
		&self.server_id
	}

	/// Returns the account's effective display name, or `None` if it cannot
	/// be found. Must not be awaited on the game thread.
	pub async fn resolve(&self, account: ExternalAccountId) -> Option<String> {
		let name = self.client.account_name(&self.server_id, account).await;
		tracing::trace!(%account, found = name.is_some(), "resolve.account_name");
		name
	}
}

/// Adapts a blocking lookup function into a [`PlatformClient`] by running it
/// on the blocking pool.
pub struct BlockingClient<F> {
	lookup: Arc<F>,
}

impl<F> BlockingClient<F>
where
	F: Fn(&str, ExternalAccountId) -> Option<String> + Send + Sync + 'static,
{
	pub fn new(lookup: F) -> Self {
		Self { lookup: Arc::new(lookup) }
	}
}

#[async_trait]
impl<F> PlatformClient for BlockingClient<F>
where
	F: Fn(&str, ExternalAccountId) -> Option<String> + Send + Sync + 'static,
{
	async fn account_name(&self, server_id: &str, account: ExternalAccountId) -> Option<String> {
		let lookup = Arc::clone(&self.lookup);
		let server_id = server_id.to_string();
		let task = match nicktag_worker::spawn_blocking(TaskClass::IoBlocking, move || (*lookup)(&server_id, account)) {
			Ok(task) => task,
			Err(err) => {
				tracing::warn!(%account, error = %err, "blocking account lookup could not start");
				return None;
			}
		};
		match task.await {
			Ok(name) => name,
			Err(err) => {
				tracing::warn!(%account, error = %err, "blocking account lookup did not complete");
				None
			}
		}
	}
}
