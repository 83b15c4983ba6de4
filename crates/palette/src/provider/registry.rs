use std::sync::Arc;

use indexmap::IndexMap;

use super::{DynamicProvider, ProviderMetadata};
use crate::error::RegistryError;

/// Providers keyed by id, iterated in registration order.
#[derive(Default)]
pub struct ProviderRegistry {
	providers: IndexMap<String, Arc<dyn DynamicProvider>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a provider. Ids must be unique.
	pub fn register(&mut self, provider: Arc<dyn DynamicProvider>) -> Result<(), RegistryError> {
		let id = provider.id().to_string();
		if self.providers.contains_key(&id) {
			return Err(RegistryError::DuplicateProvider(id));
		}
		tracing::debug!(provider = %id, "palette.provider.register");
		self.providers.insert(id, provider);
		Ok(())
	}

	/// Removes a provider, keeping the registration order of the rest.
	pub fn unregister(&mut self, id: &str) -> Result<Arc<dyn DynamicProvider>, RegistryError> {
		let removed = self.providers.shift_remove(id).ok_or_else(|| RegistryError::UnknownProvider(id.to_string()))?;
		tracing::debug!(provider = %id, "palette.provider.unregister");
		Ok(removed)
	}

	pub fn get(&self, id: &str) -> Option<&Arc<dyn DynamicProvider>> {
		self.providers.get(id)
	}

	pub fn metadata(&self, id: &str) -> Option<ProviderMetadata> {
		self.providers.get(id).map(|provider| provider.metadata())
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.providers.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn DynamicProvider>> {
		self.providers.values()
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}
}
