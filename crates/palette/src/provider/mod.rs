//! Dynamic command providers.
//!
//! A provider produces a batch of [`CommandDescriptor`]s from live host state
//! (open tabs, workspaces, extensions, ...). Providers are registered by id in
//! a [`ProviderRegistry`] and their output is memoized by a [`ProviderCache`].

mod cache;
mod registry;

use std::future::Future;

use async_trait::async_trait;

pub use cache::{CacheStats, DynamicSet, ProviderCache};
pub use registry::ProviderRegistry;

use crate::descriptor::CommandDescriptor;
use crate::error::ProviderError;

/// Configuration metadata attached to a provider. Not used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderMetadata {
	/// Whether descriptor icons from this provider are displayed.
	pub allow_icons: bool,
	/// Whether descriptor shortcuts from this provider are displayed.
	pub allow_shortcuts: bool,
}

impl Default for ProviderMetadata {
	fn default() -> Self {
		Self {
			allow_icons: true,
			allow_shortcuts: true,
		}
	}
}

/// Capability contract for dynamic descriptor providers.
///
/// Providers must not touch shared palette state; everything they contribute
/// goes through the return value of [`Self::generate`].
#[async_trait]
pub trait DynamicProvider: Send + Sync {
	/// Stable provider id, unique within a registry.
	fn id(&self) -> &str;

	fn metadata(&self) -> ProviderMetadata {
		ProviderMetadata::default()
	}

	/// Gate re-evaluated every time the cache is refilled.
	fn enabled(&self) -> bool {
		true
	}

	/// Produces the provider's full descriptor set, replacing any earlier one.
	async fn generate(&self) -> Result<Vec<CommandDescriptor>, ProviderError>;
}

/// Closure-backed provider adapter.
pub struct FnProvider<G, E> {
	id: String,
	generate: G,
	enabled: E,
	metadata: ProviderMetadata,
}

impl<G, E> FnProvider<G, E> {
	pub fn new<Fut>(id: impl Into<String>, generate: G, enabled: E, metadata: ProviderMetadata) -> Self
	where
		G: Fn() -> Fut,
		Fut: Future<Output = Result<Vec<CommandDescriptor>, ProviderError>>,
		E: Fn() -> bool,
	{
		Self {
			id: id.into(),
			generate,
			enabled,
			metadata,
		}
	}
}

#[async_trait]
impl<G, Fut, E> DynamicProvider for FnProvider<G, E>
where
	G: Fn() -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Vec<CommandDescriptor>, ProviderError>> + Send + 'static,
	E: Fn() -> bool + Send + Sync + 'static,
{
	fn id(&self) -> &str {
		&self.id
	}

	fn metadata(&self) -> ProviderMetadata {
		self.metadata
	}

	fn enabled(&self) -> bool {
		(self.enabled)()
	}

	async fn generate(&self) -> Result<Vec<CommandDescriptor>, ProviderError> {
		(self.generate)().await
	}
}

#[cfg(test)]
mod tests;
