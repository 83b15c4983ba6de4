use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cmdbar_config::PaletteConfig;
use cmdbar_worker::{TaskBatch, TaskClass};
use parking_lot::{Mutex, RwLock};
use tokio::sync::OnceCell;

use super::{DynamicProvider, ProviderMetadata, ProviderRegistry};
use crate::descriptor::{CommandDescriptor, CommandSource};
use crate::error::{ProviderError, RegistryError};

/// Aggregated provider output in registration order.
pub type DynamicSet = Arc<[Arc<CommandDescriptor>]>;

/// Hit/miss counters for cache instrumentation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
	pub hits: u64,
	pub misses: u64,
}

struct InFlight {
	epoch: u64,
	fill: Arc<OnceCell<DynamicSet>>,
}

/// Memoizes the aggregated output of all enabled providers.
///
/// The cache is short-lived: it belongs to one interactive session and is
/// dropped by [`Self::invalidate`] on configuration changes, registry changes
/// and when a command-mode session ends.
///
/// # Consistency
///
/// Every invalidation bumps an epoch. A refill whose providers were started
/// under an older epoch is returned to its caller but never stored.
///
/// Concurrent cached reads share one in-flight refill per epoch, so a slow
/// provider is not re-invoked on every keystroke while its first call runs.
#[derive(Default)]
pub struct ProviderCache {
	registry: RwLock<ProviderRegistry>,
	cached: Mutex<Option<DynamicSet>>,
	inflight: Mutex<Option<InFlight>>,
	epoch: AtomicU64,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl ProviderCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a provider and invalidates the cache.
	pub fn register(&self, provider: Arc<dyn DynamicProvider>) -> Result<(), RegistryError> {
		self.registry.write().register(provider)?;
		self.invalidate();
		Ok(())
	}

	/// Unregisters a provider and invalidates the cache.
	pub fn unregister(&self, id: &str) -> Result<(), RegistryError> {
		self.registry.write().unregister(id)?;
		self.invalidate();
		Ok(())
	}

	pub fn metadata(&self, id: &str) -> Option<ProviderMetadata> {
		self.registry.read().metadata(id)
	}

	pub fn provider_ids(&self) -> Vec<String> {
		self.registry.read().ids().map(str::to_string).collect()
	}

	/// Returns all dynamic descriptors, regenerating them unless a cached
	/// aggregate exists and `use_cache` is set.
	///
	/// Enabled providers run concurrently. A provider that fails or panics
	/// contributes nothing; the failure is logged and never propagated.
	pub async fn get_all(&self, use_cache: bool, config: &PaletteConfig) -> DynamicSet {
		if !use_cache {
			self.misses.fetch_add(1, Ordering::Relaxed);
			return self.generate(config).await;
		}

		if let Some(cached) = self.cached() {
			self.hits.fetch_add(1, Ordering::Relaxed);
			tracing::trace!(descriptors = cached.len(), "palette.cache.hit");
			return cached;
		}

		let (epoch, fill) = self.join_fill();
		let mut ran = false;
		let set = fill
			.get_or_init(|| {
				ran = true;
				self.misses.fetch_add(1, Ordering::Relaxed);
				self.generate(config)
			})
			.await
			.clone();

		if ran {
			self.store_fill(epoch, &fill, &set);
		} else {
			self.hits.fetch_add(1, Ordering::Relaxed);
			tracing::trace!(epoch, descriptors = set.len(), "palette.cache.joined");
		}
		set
	}

	/// Returns the cached aggregate without regenerating anything.
	pub fn cached(&self) -> Option<DynamicSet> {
		self.cached.lock().clone()
	}

	/// Returns the refill slot for the current epoch, creating it if needed.
	fn join_fill(&self) -> (u64, Arc<OnceCell<DynamicSet>>) {
		let mut inflight = self.inflight.lock();
		let epoch = self.epoch.load(Ordering::Acquire);
		if let Some(current) = inflight.as_ref()
			&& current.epoch == epoch
		{
			return (epoch, Arc::clone(&current.fill));
		}
		let fill = Arc::new(OnceCell::new());
		*inflight = Some(InFlight {
			epoch,
			fill: Arc::clone(&fill),
		});
		(epoch, fill)
	}

	fn store_fill(&self, epoch: u64, fill: &Arc<OnceCell<DynamicSet>>, set: &DynamicSet) {
		let mut inflight = self.inflight.lock();
		if inflight.as_ref().is_some_and(|current| Arc::ptr_eq(&current.fill, fill)) {
			*inflight = None;
		}
		let mut cached = self.cached.lock();
		if self.epoch.load(Ordering::Acquire) == epoch {
			*cached = Some(Arc::clone(set));
		} else {
			tracing::debug!(epoch, "palette.cache.refill_discarded");
		}
	}

	async fn generate(&self, config: &PaletteConfig) -> DynamicSet {
		let providers: Vec<Arc<dyn DynamicProvider>> = self
			.registry
			.read()
			.iter()
			.filter(|provider| config.provider_enabled(provider.id()) && provider.enabled())
			.cloned()
			.collect();

		let mut batch = TaskBatch::new(TaskClass::Background);
		for provider in &providers {
			let provider = Arc::clone(provider);
			batch.spawn(async move { provider.generate().await });
		}
		let results = batch.join_all().await;

		let mut descriptors = Vec::new();
		for (provider, result) in providers.iter().zip(results) {
			let id = provider.id();
			let generated = match result {
				Ok(generated) => generated,
				Err(_) => Err(ProviderError::Panicked),
			};
			match generated {
				Ok(produced) => {
					tracing::trace!(provider = %id, descriptors = produced.len(), "palette.provider.generated");
					let source = CommandSource::Dynamic { provider: id.to_string() };
					descriptors.extend(produced.into_iter().map(|descriptor| Arc::new(descriptor.with_source(source.clone()))));
				}
				Err(error) => tracing::warn!(provider = %id, %error, "dynamic provider failed"),
			}
		}

		let set: DynamicSet = descriptors.into();
		tracing::debug!(providers = providers.len(), descriptors = set.len(), "palette.cache.miss");
		set
	}

	/// Drops the cached aggregate; the next access regenerates it.
	pub fn invalidate(&self) {
		let mut inflight = self.inflight.lock();
		let mut cached = self.cached.lock();
		*inflight = None;
		let epoch = self.epoch.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		if cached.take().is_some() {
			tracing::debug!(epoch, "palette.cache.invalidate");
		}
	}

	pub fn is_cached(&self) -> bool {
		self.cached.lock().is_some()
	}

	pub fn stats(&self) -> CacheStats {
		CacheStats {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
		}
	}
}
