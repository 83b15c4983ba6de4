//! Error types for providers, commands and engine setup.
//!
//! Provider, visibility and action errors are caught at the boundary of the
//! task that produced them and only ever logged or surfaced as notifications.

use thiserror::Error;

/// A dynamic provider failed to produce its descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
	#[error("provider failed: {0}")]
	Failed(String),
	#[error("provider task panicked")]
	Panicked,
}

impl ProviderError {
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// A descriptor's visibility condition could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("visibility check failed: {0}")]
pub struct VisibilityError(pub String);

impl VisibilityError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// A command action failed while being dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
	#[error("{0}")]
	Failed(String),
	#[error("command task panicked")]
	Panicked,
}

impl ActionError {
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}

/// Provider registration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	#[error("provider `{0}` is already registered")]
	DuplicateProvider(String),
	#[error("provider `{0}` is not registered")]
	UnknownProvider(String),
}

/// Errors raised while building an [`crate::Engine`].
#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Config(#[from] cmdbar_config::ConfigError),
	#[error(transparent)]
	Registry(#[from] RegistryError),
}
