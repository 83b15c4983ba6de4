//! The palette engine facade the host surface talks to.
//!
//! An [`Engine`] owns every piece of palette state and is constructed
//! explicitly through [`EngineBuilder`]; there are no process-wide
//! singletons. Locks are only held for synchronous sections, never across a
//! provider await.

use std::future::Future;
use std::sync::Arc;

use cmdbar_config::{ConfigSource, PaletteConfig, StaticConfig};
use parking_lot::{Mutex, RwLock};

use crate::descriptor::CommandDescriptor;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::{EngineError, ProviderError, RegistryError};
use crate::notifications::Notifier;
use crate::provider::{CacheStats, DynamicProvider, FnProvider, ProviderCache, ProviderMetadata};
use crate::rank::Ranker;
use crate::recency::{RecencyTracker, SharedRecency};
use crate::session::{QuerySession, SessionState, Transition};
use crate::store::CommandStore;
use crate::view::{NO_RESULTS_KEY, PaletteResults, ResultEntry};

/// Result of feeding one input event to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
	/// Results for the current generation, already committed to the session.
	Results(PaletteResults),
	/// The session is inactive; the host should show nothing.
	Inactive,
	/// A newer input event superseded this one; its output was discarded.
	Superseded,
}

impl QueryOutcome {
	pub fn results(&self) -> Option<&PaletteResults> {
		match self {
			Self::Results(results) => Some(results),
			_ => None,
		}
	}
}

pub struct Engine {
	config_source: Arc<dyn ConfigSource>,
	config: RwLock<Arc<PaletteConfig>>,
	store: RwLock<CommandStore>,
	providers: ProviderCache,
	recency: SharedRecency,
	session: Mutex<QuerySession>,
	dispatcher: Dispatcher,
}

impl Engine {
	pub fn builder() -> EngineBuilder {
		EngineBuilder::default()
	}

	pub fn config(&self) -> Arc<PaletteConfig> {
		self.config.read().clone()
	}

	pub fn state(&self) -> SessionState {
		self.session.lock().state()
	}

	pub fn generation(&self) -> u64 {
		self.session.lock().generation()
	}

	/// The last committed result set, used to resolve clicks without re-ranking.
	pub fn current_results(&self) -> Option<PaletteResults> {
		self.session.lock().results().cloned()
	}

	pub fn register_command(&self, command: CommandDescriptor) {
		self.store.write().register(command);
	}

	pub fn remove_command(&self, key: &str) -> bool {
		self.store.write().remove(key)
	}

	pub fn register_provider(&self, provider: Arc<dyn DynamicProvider>) -> Result<(), RegistryError> {
		self.providers.register(provider)
	}

	/// Registers a closure-backed provider.
	pub fn register_fn_provider<G, Fut, E>(&self, id: impl Into<String>, generate: G, enabled: E, metadata: ProviderMetadata) -> Result<(), RegistryError>
	where
		G: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Vec<CommandDescriptor>, ProviderError>> + Send + 'static,
		E: Fn() -> bool + Send + Sync + 'static,
	{
		self.register_provider(Arc::new(FnProvider::new(id, generate, enabled, metadata)))
	}

	pub fn unregister_provider(&self, id: &str) -> Result<(), RegistryError> {
		self.providers.unregister(id)
	}

	/// Replaces the host-native commands. They can be dispatched but are
	/// never ranked.
	pub fn set_native_commands<I>(&self, commands: I)
	where
		I: IntoIterator<Item = CommandDescriptor>,
	{
		self.dispatcher.set_native(commands.into_iter().map(Arc::new).collect());
	}

	pub fn providers(&self) -> &ProviderCache {
		&self.providers
	}

	/// Drops cached provider output.
	pub fn invalidate(&self) {
		self.providers.invalidate();
	}

	pub fn cache_stats(&self) -> CacheStats {
		self.providers.stats()
	}

	/// Validates and applies a new configuration.
	pub fn set_config(&self, config: PaletteConfig) -> Result<(), EngineError> {
		config.validate()?;
		self.apply_config(config);
		Ok(())
	}

	/// Re-reads the configuration source.
	///
	/// On failure the last good configuration stays in effect and `false` is
	/// returned.
	pub fn reload_config(&self) -> bool {
		match self.config_source.load() {
			Ok(config) => {
				self.apply_config(config);
				true
			}
			Err(error) => {
				tracing::warn!(%error, "palette config reload failed; keeping previous config");
				false
			}
		}
	}

	fn apply_config(&self, config: PaletteConfig) {
		self.session.lock().configure(&config);
		self.recency.write().set_capacity(config.ranking.recency_capacity);
		*self.config.write() = Arc::new(config);
		self.providers.invalidate();
		tracing::debug!("palette.config.applied");
	}

	/// Most-recent-first list of executed keys, for persistence.
	pub fn recency_snapshot(&self) -> Vec<String> {
		self.recency.read().snapshot()
	}

	/// Handles one host input event.
	///
	/// Provider work runs with no lock held. If another input event arrives
	/// meanwhile, this call's output is discarded and
	/// [`QueryOutcome::Superseded`] is returned.
	pub async fn on_input(&self, raw: &str, cancel_requested: bool) -> QueryOutcome {
		let transition = self.session.lock().on_input(raw, cancel_requested);
		let plan = match transition {
			Transition::Query(plan) => plan,
			Transition::Deactivated { ended_session } => {
				if ended_session {
					self.end_session();
				}
				return QueryOutcome::Inactive;
			}
		};

		let config = self.config();
		let dynamic = self.providers.get_all(true, &config).await;
		if plan.ticket.is_stale() {
			tracing::debug!(generation = plan.ticket.generation(), "palette.query.stale");
			return QueryOutcome::Superseded;
		}

		let candidates = self.store.read().assemble(&dynamic, &config);
		let entries: Vec<ResultEntry> = {
			let recency = self.recency.read();
			Ranker::new(config.ranking.clone())
				.rank(&plan.query, &candidates, &recency, plan.mode)
				.iter()
				.map(|command| {
					let metadata = command.provider().and_then(|id| self.providers.metadata(id));
					ResultEntry::from_descriptor(command, &config, metadata)
				})
				.collect()
		};
		let results = PaletteResults::new(plan.ticket.generation(), entries, plan.command_mode, plan.visible_input);

		if !self.session.lock().commit(&plan.ticket, results.clone()) {
			return QueryOutcome::Superseded;
		}
		QueryOutcome::Results(results)
	}

	/// Handles a selection from the host.
	pub async fn on_select(&self, key: &str) -> DispatchOutcome {
		if key == NO_RESULTS_KEY {
			self.on_session_close();
			return DispatchOutcome::Closed;
		}
		self.execute(key).await
	}

	/// Executes `key` unless it is hidden by configuration.
	///
	/// The key is resolved against the current static commands and whatever
	/// provider output is cached, then against native commands. Providers are
	/// never invoked here.
	pub async fn execute(&self, key: &str) -> DispatchOutcome {
		let config = self.config();
		if config.is_hidden(key) {
			tracing::debug!(key, "palette.dispatch.hidden");
			return DispatchOutcome::NotFound;
		}
		let dynamic = self.providers.cached();
		let candidates = self.store.read().assemble(dynamic.as_deref().unwrap_or_default(), &config);
		self.dispatcher.execute(key, &candidates).await
	}

	/// The host surface lost focus or closed.
	pub fn on_session_close(&self) {
		let was_active = self.session.lock().close();
		if was_active {
			self.end_session();
		}
	}

	/// Drops per-session provider output unless configured to keep it.
	fn end_session(&self) {
		if self.config().keep_cache_across_sessions {
			return;
		}
		self.providers.invalidate();
	}
}

/// Collects collaborators for an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
	config: Option<PaletteConfig>,
	config_source: Option<Arc<dyn ConfigSource>>,
	commands: Vec<CommandDescriptor>,
	providers: Vec<Arc<dyn DynamicProvider>>,
	native: Vec<CommandDescriptor>,
	notifier: Option<Arc<dyn Notifier>>,
}

impl EngineBuilder {
	/// Uses a fixed in-memory configuration.
	pub fn config(mut self, config: PaletteConfig) -> Self {
		self.config = Some(config);
		self
	}

	/// Reads configuration from `source`. Takes precedence over [`Self::config`].
	pub fn config_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
		self.config_source = Some(source);
		self
	}

	pub fn command(mut self, command: CommandDescriptor) -> Self {
		self.commands.push(command);
		self
	}

	pub fn commands<I>(mut self, commands: I) -> Self
	where
		I: IntoIterator<Item = CommandDescriptor>,
	{
		self.commands.extend(commands);
		self
	}

	pub fn provider(mut self, provider: Arc<dyn DynamicProvider>) -> Self {
		self.providers.push(provider);
		self
	}

	pub fn native_commands<I>(mut self, commands: I) -> Self
	where
		I: IntoIterator<Item = CommandDescriptor>,
	{
		self.native.extend(commands);
		self
	}

	pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	/// Loads configuration, seeds recency and registers everything collected.
	pub fn build(self) -> Result<Engine, EngineError> {
		let source: Arc<dyn ConfigSource> = match self.config_source {
			Some(source) => source,
			None => Arc::new(StaticConfig::new(self.config.unwrap_or_default())),
		};
		let config = source.load()?;

		let capacity = config.ranking.recency_capacity;
		let tracker = match &config.recency {
			Some(keys) => RecencyTracker::with_entries(capacity, keys.iter().cloned()),
			None => RecencyTracker::new(capacity),
		};
		let recency: SharedRecency = Arc::new(RwLock::new(tracker));

		let providers = ProviderCache::new();
		for provider in self.providers {
			providers.register(provider)?;
		}

		let dispatcher = Dispatcher::new(Arc::clone(&recency), self.notifier);
		dispatcher.set_native(self.native.into_iter().map(Arc::new).collect());

		tracing::debug!(commands = self.commands.len(), providers = providers.provider_ids().len(), "palette.engine.build");

		Ok(Engine {
			config_source: source,
			session: Mutex::new(QuerySession::new(&config)),
			config: RwLock::new(Arc::new(config)),
			store: RwLock::new(CommandStore::with_commands(self.commands)),
			providers,
			recency,
			dispatcher,
		})
	}
}
