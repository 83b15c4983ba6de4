//! Static command declarations and candidate assembly.

use std::sync::Arc;

use cmdbar_config::PaletteConfig;
use rustc_hash::FxHashMap;

use crate::descriptor::{CommandDescriptor, CommandSource};

/// Ordered collection of statically declared commands.
#[derive(Debug, Default, Clone)]
pub struct CommandStore {
	statics: Vec<Arc<CommandDescriptor>>,
}

impl CommandStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_commands<I>(commands: I) -> Self
	where
		I: IntoIterator<Item = CommandDescriptor>,
	{
		let mut store = Self::new();
		for command in commands {
			store.register(command);
		}
		store
	}

	/// Declares a static command. Re-declaring a key replaces it in place.
	pub fn register(&mut self, command: CommandDescriptor) {
		let command = Arc::new(command.with_source(CommandSource::Static));
		match self.statics.iter().position(|existing| existing.key == command.key) {
			Some(idx) => {
				tracing::debug!(key = %command.key, "palette.store.replace");
				self.statics[idx] = command;
			}
			None => self.statics.push(command),
		}
	}

	pub fn remove(&mut self, key: &str) -> bool {
		let before = self.statics.len();
		self.statics.retain(|command| command.key != key);
		before != self.statics.len()
	}

	pub fn get(&self, key: &str) -> Option<&Arc<CommandDescriptor>> {
		self.statics.iter().find(|command| command.key == key)
	}

	pub fn statics(&self) -> &[Arc<CommandDescriptor>] {
		&self.statics
	}

	pub fn len(&self) -> usize {
		self.statics.len()
	}

	pub fn is_empty(&self) -> bool {
		self.statics.is_empty()
	}

	/// Builds the full candidate set: statics first, then dynamic output.
	///
	/// Keys are unique in the result. When a key repeats, the last occurrence
	/// wins and keeps its own position. Hidden keys are removed.
	pub fn assemble(&self, dynamic: &[Arc<CommandDescriptor>], config: &PaletteConfig) -> Vec<Arc<CommandDescriptor>> {
		let all = || self.statics.iter().chain(dynamic.iter());

		let mut last_index: FxHashMap<&str, usize> = FxHashMap::default();
		for (idx, command) in all().enumerate() {
			if let Some(previous) = last_index.insert(command.key.as_str(), idx) {
				tracing::debug!(key = %command.key, previous, replacement = idx, "palette.store.duplicate_key");
			}
		}

		all()
			.enumerate()
			.filter(|(idx, command)| last_index.get(command.key.as_str()) == Some(idx) && !config.is_hidden(&command.key))
			.map(|(_, command)| Arc::clone(command))
			.collect()
	}
}
