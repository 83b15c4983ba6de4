//! Presentation-ready result entries.

use cmdbar_config::PaletteConfig;

use crate::descriptor::CommandDescriptor;
use crate::provider::ProviderMetadata;

/// Key of the non-executable entry shown when command mode has no matches.
pub const NO_RESULTS_KEY: &str = "cmdbar:no-results";
pub const NO_RESULTS_LABEL: &str = "No matching commands";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
	Command,
	/// Selecting it closes the palette instead of executing anything.
	Placeholder,
}

/// One row of palette output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
	pub key: String,
	pub label: String,
	pub icon: Option<String>,
	pub shortcut: Option<String>,
	pub kind: EntryKind,
}

impl ResultEntry {
	pub fn placeholder() -> Self {
		Self {
			key: NO_RESULTS_KEY.to_string(),
			label: NO_RESULTS_LABEL.to_string(),
			icon: None,
			shortcut: None,
			kind: EntryKind::Placeholder,
		}
	}

	/// Builds an entry for display.
	///
	/// A configured icon override wins over the descriptor's own icon. Icons
	/// and shortcuts of dynamic descriptors are dropped when their provider's
	/// metadata disallows them.
	pub fn from_descriptor(command: &CommandDescriptor, config: &PaletteConfig, metadata: Option<ProviderMetadata>) -> Self {
		let metadata = metadata.unwrap_or_default();
		let icon = match config.custom_icon(&command.key) {
			Some(icon) => Some(icon.to_string()),
			None if metadata.allow_icons => command.icon.clone(),
			None => None,
		};
		let shortcut = if metadata.allow_shortcuts { command.shortcut.clone() } else { None };

		Self {
			key: command.key.clone(),
			label: command.label.clone(),
			icon,
			shortcut,
			kind: EntryKind::Command,
		}
	}

	pub fn is_executable(&self) -> bool {
		self.kind == EntryKind::Command
	}
}

/// A committed result list for one query generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteResults {
	/// Generation of the query that produced these results.
	pub generation: u64,
	pub entries: Vec<ResultEntry>,
	/// Entry the host should highlight by default.
	pub default_index: Option<usize>,
	/// Whether the session was in command mode.
	pub command_mode: bool,
	/// Input text with the reserved prefix stripped.
	pub visible_input: String,
}

impl PaletteResults {
	/// Wraps ranked entries, substituting the placeholder for an empty
	/// command-mode list.
	pub fn new(generation: u64, mut entries: Vec<ResultEntry>, command_mode: bool, visible_input: impl Into<String>) -> Self {
		if command_mode && entries.is_empty() {
			entries.push(ResultEntry::placeholder());
		}
		let default_index = (!entries.is_empty()).then_some(0);
		Self {
			generation,
			entries,
			default_index,
			command_mode,
			visible_input: visible_input.into(),
		}
	}

	pub fn keys(&self) -> Vec<&str> {
		self.entries.iter().map(|entry| entry.key.as_str()).collect()
	}

	pub fn is_placeholder(&self) -> bool {
		matches!(self.entries.as_slice(), [entry] if entry.kind == EntryKind::Placeholder)
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
