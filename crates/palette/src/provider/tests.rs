use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cmdbar_config::{PaletteConfig, ProviderConfig};
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

use super::*;
use crate::descriptor::{Action, CommandSource};
use crate::error::RegistryError;

struct CountingProvider {
	id: &'static str,
	keys: Vec<&'static str>,
	calls: AtomicUsize,
}

impl CountingProvider {
	fn new(id: &'static str, keys: &[&'static str]) -> Arc<Self> {
		Arc::new(Self {
			id,
			keys: keys.to_vec(),
			calls: AtomicUsize::new(0),
		})
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl DynamicProvider for CountingProvider {
	fn id(&self) -> &str {
		self.id
	}

	async fn generate(&self) -> Result<Vec<CommandDescriptor>, ProviderError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.keys.iter().map(|key| CommandDescriptor::new(*key, key.to_uppercase(), Action::noop())).collect())
	}
}

fn keys(set: &DynamicSet) -> Vec<&str> {
	set.iter().map(|command| command.key.as_str()).collect()
}

#[tokio::test]
async fn cache_hit_skips_generation() {
	let cache = ProviderCache::new();
	let tabs = CountingProvider::new("tabs", &["tab:1", "tab:2"]);
	cache.register(tabs.clone()).unwrap();
	let config = PaletteConfig::default();

	let first = cache.get_all(true, &config).await;
	let second = cache.get_all(true, &config).await;

	assert_eq!(keys(&first), vec!["tab:1", "tab:2"]);
	assert_eq!(keys(&second), keys(&first));
	assert_eq!(tabs.calls(), 1);
	assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
}

#[tokio::test]
async fn bypassing_cache_always_regenerates_and_does_not_store() {
	let cache = ProviderCache::new();
	let tabs = CountingProvider::new("tabs", &["tab:1"]);
	cache.register(tabs.clone()).unwrap();
	let config = PaletteConfig::default();

	cache.get_all(false, &config).await;
	cache.get_all(false, &config).await;

	assert_eq!(tabs.calls(), 2);
	assert!(!cache.is_cached());
}

#[tokio::test]
async fn invalidate_forces_regeneration() {
	let cache = ProviderCache::new();
	let tabs = CountingProvider::new("tabs", &["tab:1"]);
	cache.register(tabs.clone()).unwrap();
	let config = PaletteConfig::default();

	cache.get_all(true, &config).await;
	assert!(cache.is_cached());
	cache.invalidate();
	assert!(!cache.is_cached());
	cache.get_all(true, &config).await;

	assert_eq!(tabs.calls(), 2);
}

#[tokio::test]
async fn output_is_stamped_and_ordered_by_registration() {
	let cache = ProviderCache::new();
	cache.register(CountingProvider::new("tabs", &["tab:1"])).unwrap();
	cache.register(CountingProvider::new("workspaces", &["ws:a", "ws:b"])).unwrap();

	let set = cache.get_all(true, &PaletteConfig::default()).await;

	assert_eq!(keys(&set), vec!["tab:1", "ws:a", "ws:b"]);
	assert_eq!(set[0].source, CommandSource::Dynamic { provider: "tabs".into() });
	assert_eq!(set[2].provider(), Some("workspaces"));
}

#[tokio::test]
async fn failing_and_panicking_providers_contribute_nothing() {
	let cache = ProviderCache::new();
	cache
		.register(Arc::new(FnProvider::new(
			"broken",
			|| async { Err(ProviderError::failed("no session")) },
			|| true,
			ProviderMetadata::default(),
		)))
		.unwrap();
	cache
		.register(Arc::new(FnProvider::new(
			"panics",
			|| async {
				if true {
					panic!("provider exploded");
				}
				Ok(Vec::new())
			},
			|| true,
			ProviderMetadata::default(),
		)))
		.unwrap();
	cache.register(CountingProvider::new("tabs", &["tab:1"])).unwrap();

	let set = cache.get_all(true, &PaletteConfig::default()).await;

	assert_eq!(keys(&set), vec!["tab:1"]);
}

#[tokio::test]
async fn disabled_providers_are_skipped() {
	let cache = ProviderCache::new();
	let tabs = CountingProvider::new("tabs", &["tab:1"]);
	let gate = Arc::new(AtomicBool::new(false));
	let gate_reader = Arc::clone(&gate);
	cache.register(tabs.clone()).unwrap();
	cache
		.register(Arc::new(FnProvider::new(
			"gated",
			|| async { Ok(vec![CommandDescriptor::new("gated:1", "Gated", Action::noop())]) },
			move || gate_reader.load(Ordering::SeqCst),
			ProviderMetadata::default(),
		)))
		.unwrap();

	let mut config = PaletteConfig::default();
	config.providers.insert("tabs".into(), ProviderConfig { enabled: false });

	assert!(cache.get_all(false, &config).await.is_empty());
	assert_eq!(tabs.calls(), 0);

	gate.store(true, Ordering::SeqCst);
	assert_eq!(keys(&cache.get_all(false, &config).await), vec!["gated:1"]);
}

#[tokio::test]
async fn refill_started_before_invalidation_is_not_stored() {
	let cache = Arc::new(ProviderCache::new());
	let started = Arc::new(Notify::new());
	let release = Arc::new(Notify::new());
	let (started_tx, release_rx) = (Arc::clone(&started), Arc::clone(&release));
	cache
		.register(Arc::new(FnProvider::new(
			"slow",
			move || {
				let started = Arc::clone(&started_tx);
				let release = Arc::clone(&release_rx);
				async move {
					started.notify_one();
					release.notified().await;
					Ok(vec![CommandDescriptor::new("slow:1", "Slow", Action::noop())])
				}
			},
			|| true,
			ProviderMetadata::default(),
		)))
		.unwrap();

	let refill = tokio::spawn({
		let cache = Arc::clone(&cache);
		async move { cache.get_all(true, &PaletteConfig::default()).await }
	});
	started.notified().await;
	cache.invalidate();
	release.notify_one();

	let set = refill.await.unwrap();
	assert_eq!(keys(&set), vec!["slow:1"]);
	assert!(!cache.is_cached());
}

#[test]
fn duplicate_provider_ids_are_rejected() {
	let cache = ProviderCache::new();
	cache.register(CountingProvider::new("tabs", &[])).unwrap();

	let error = cache.register(CountingProvider::new("tabs", &[])).unwrap_err();

	assert_eq!(error, RegistryError::DuplicateProvider("tabs".into()));
	assert_eq!(cache.provider_ids(), vec!["tabs".to_string()]);
}

#[test]
fn unregister_removes_provider_and_reports_unknown_ids() {
	let cache = ProviderCache::new();
	cache.register(CountingProvider::new("tabs", &[])).unwrap();
	cache.register(CountingProvider::new("workspaces", &[])).unwrap();

	cache.unregister("tabs").unwrap();

	assert_eq!(cache.provider_ids(), vec!["workspaces".to_string()]);
	assert_eq!(cache.unregister("tabs"), Err(RegistryError::UnknownProvider("tabs".into())));
}

#[test]
fn metadata_is_reported_per_provider() {
	let cache = ProviderCache::new();
	let metadata = ProviderMetadata {
		allow_icons: false,
		allow_shortcuts: true,
	};
	cache
		.register(Arc::new(FnProvider::new("quiet", || async { Ok(Vec::new()) }, || true, metadata)))
		.unwrap();

	assert_eq!(cache.metadata("quiet"), Some(metadata));
	assert_eq!(cache.metadata("missing"), None);
}

#[tokio::test]
async fn concurrent_cached_reads_share_one_refill() {
	let cache = Arc::new(ProviderCache::new());
	let calls = Arc::new(AtomicUsize::new(0));
	let started = Arc::new(Notify::new());
	let release = Arc::new(Notify::new());
	{
		let (calls, started, release) = (Arc::clone(&calls), Arc::clone(&started), Arc::clone(&release));
		cache
			.register(Arc::new(FnProvider::new(
				"slow",
				move || {
					calls.fetch_add(1, Ordering::SeqCst);
					let (started, release) = (Arc::clone(&started), Arc::clone(&release));
					async move {
						started.notify_one();
						release.notified().await;
						Ok(vec![CommandDescriptor::new("slow:1", "Slow", Action::noop())])
					}
				},
				|| true,
				ProviderMetadata::default(),
			)))
			.unwrap();
	}

	let read = |cache: &Arc<ProviderCache>| {
		let cache = Arc::clone(cache);
		tokio::spawn(async move { cache.get_all(true, &PaletteConfig::default()).await })
	};
	let first = read(&cache);
	started.notified().await;
	let second = read(&cache);
	tokio::task::yield_now().await;
	release.notify_one();

	assert_eq!(keys(&first.await.unwrap()), vec!["slow:1"]);
	assert_eq!(keys(&second.await.unwrap()), vec!["slow:1"]);
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
	assert!(cache.is_cached());
}

#[tokio::test]
async fn cached_peek_never_generates() {
	let cache = ProviderCache::new();
	let tabs = CountingProvider::new("tabs", &["tab:1"]);
	cache.register(tabs.clone()).unwrap();

	assert!(cache.cached().is_none());
	cache.get_all(true, &PaletteConfig::default()).await;

	assert_eq!(cache.cached().map(|set| set.len()), Some(1));
	assert_eq!(tabs.calls(), 1);
}
