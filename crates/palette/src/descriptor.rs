//! Command descriptors and their visibility/action capabilities.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{ActionError, VisibilityError};

/// Boxed future returned by asynchronous command actions.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ActionError>> + Send>>;

type SyncActionFn = dyn Fn() -> Result<(), ActionError> + Send + Sync;
type AsyncActionFn = dyn Fn() -> ActionFuture + Send + Sync;
type VisibilityFn = dyn Fn() -> Result<bool, VisibilityError> + Send + Sync;

/// Where a descriptor came from. Used for configuration grouping only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandSource {
	Static,
	Dynamic { provider: String },
}

/// Visibility capability, evaluated fresh on every ranking pass.
#[derive(Clone, Default)]
pub enum Visibility {
	#[default]
	Always,
	Fixed(bool),
	When(Arc<VisibilityFn>),
}

impl Visibility {
	pub fn evaluate(&self) -> Result<bool, VisibilityError> {
		match self {
			Self::Always => Ok(true),
			Self::Fixed(visible) => Ok(*visible),
			Self::When(condition) => condition(),
		}
	}
}

impl fmt::Debug for Visibility {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Always => f.write_str("Always"),
			Self::Fixed(visible) => f.debug_tuple("Fixed").field(visible).finish(),
			Self::When(_) => f.write_str("When(..)"),
		}
	}
}

/// Side-effecting command body, either synchronous or asynchronous.
#[derive(Clone)]
pub enum Action {
	Sync(Arc<SyncActionFn>),
	Async(Arc<AsyncActionFn>),
}

impl Action {
	pub fn sync<F>(f: F) -> Self
	where
		F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
	{
		Self::Sync(Arc::new(f))
	}

	pub fn from_async<F, Fut>(f: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
	{
		Self::Async(Arc::new(move || Box::pin(f())))
	}

	/// An action that does nothing and always succeeds.
	pub fn noop() -> Self {
		Self::sync(|| Ok(()))
	}

	pub fn is_async(&self) -> bool {
		matches!(self, Self::Async(_))
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Sync(_) => f.write_str("Sync(..)"),
			Self::Async(_) => f.write_str("Async(..)"),
		}
	}
}

/// A named, executable palette entry with display metadata.
#[derive(Clone, Debug)]
pub struct CommandDescriptor {
	/// Globally unique, stable identifier.
	pub key: String,
	/// Display text and primary match target.
	pub label: String,
	/// Secondary match targets.
	pub tags: Vec<String>,
	pub source: CommandSource,
	pub visible: Visibility,
	pub action: Action,
	pub icon: Option<String>,
	/// Keyboard shortcut shown next to the label.
	pub shortcut: Option<String>,
}

impl CommandDescriptor {
	pub fn new(key: impl Into<String>, label: impl Into<String>, action: Action) -> Self {
		Self {
			key: key.into(),
			label: label.into(),
			tags: Vec::new(),
			source: CommandSource::Static,
			visible: Visibility::Always,
			action,
			icon: None,
			shortcut: None,
		}
	}

	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = tags.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
		self.shortcut = Some(shortcut.into());
		self
	}

	pub fn with_visibility(mut self, visible: Visibility) -> Self {
		self.visible = visible;
		self
	}

	/// Shows the command only while `condition` returns `Ok(true)`.
	pub fn visible_when<F>(self, condition: F) -> Self
	where
		F: Fn() -> Result<bool, VisibilityError> + Send + Sync + 'static,
	{
		self.with_visibility(Visibility::When(Arc::new(condition)))
	}

	pub(crate) fn with_source(mut self, source: CommandSource) -> Self {
		self.source = source;
		self
	}

	/// Returns the originating provider id for dynamic descriptors.
	pub fn provider(&self) -> Option<&str> {
		match &self.source {
			CommandSource::Static => None,
			CommandSource::Dynamic { provider } => Some(provider),
		}
	}

	/// Evaluates visibility, treating a failed check as hidden.
	pub fn is_visible(&self) -> bool {
		match self.visible.evaluate() {
			Ok(visible) => visible,
			Err(error) => {
				tracing::warn!(key = %self.key, %error, "command visibility check failed");
				false
			}
		}
	}

	pub(crate) fn tags_text(&self) -> String {
		self.tags.join(" ")
	}
}
