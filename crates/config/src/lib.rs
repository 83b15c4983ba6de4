//! Configuration for the command palette.
//!
//! The palette engine treats configuration as read-mostly input that is
//! re-read whenever it is invalidated. It is written in TOML:
//!
//! ```toml
//! prefix = ":"
//! keep_cache_across_sessions = false
//! hidden_keys = ["cmd:dev-tools"]
//! recency = ["cmd:settings"]
//!
//! [custom_icons]
//! "cmd:settings" = "chrome://icons/gear.svg"
//!
//! [providers.tabs]
//! enabled = false
//!
//! [ranking]
//! min_query_len = 3
//! free_limit = 6
//! prefix_limit = 50
//! ```
//!
//! Every field is optional; omitted fields take the values of
//! [`PaletteConfig::default`]. Unknown fields are rejected so typos surface
//! as errors instead of silently falling back to defaults.

pub mod error;
mod ranking;
mod source;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::{ConfigError, Result};
pub use ranking::RankingConfig;
pub use source::{ConfigSource, FileConfig, StaticConfig};

/// Default reserved prefix that switches the palette into command mode.
pub const DEFAULT_PREFIX: char = ':';

/// Parsed palette configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
	/// Sentinel character that enters command mode when it leads the input.
	pub prefix: char,
	/// Keep the dynamic provider cache when a command-mode session ends.
	pub keep_cache_across_sessions: bool,
	/// Command keys never offered or dispatched.
	pub hidden_keys: BTreeSet<String>,
	/// Persisted most-recent-first list of executed command keys.
	pub recency: Option<Vec<String>>,
	/// Icon overrides keyed by command key.
	pub custom_icons: BTreeMap<String, String>,
	/// Per-provider overrides keyed by provider id.
	pub providers: BTreeMap<String, ProviderConfig>,
	pub ranking: RankingConfig,
}

/// Per-provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
	pub enabled: bool,
}

impl Default for ProviderConfig {
	fn default() -> Self {
		Self { enabled: true }
	}
}

impl Default for PaletteConfig {
	fn default() -> Self {
		Self {
			prefix: DEFAULT_PREFIX,
			keep_cache_across_sessions: false,
			hidden_keys: BTreeSet::new(),
			recency: None,
			custom_icons: BTreeMap::new(),
			providers: BTreeMap::new(),
			ranking: RankingConfig::default(),
		}
	}
}

impl PaletteConfig {
	/// Parses and validates a TOML string.
	pub fn parse(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&content)
	}

	/// Renders the configuration as TOML.
	pub fn to_toml_string(&self) -> Result<String> {
		Ok(toml::to_string(self)?)
	}

	/// Writes the configuration to `path`, replacing any existing file.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let content = self.to_toml_string()?;
		std::fs::write(path, content).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})
	}

	/// Checks values that parse but cannot be used.
	pub fn validate(&self) -> Result<()> {
		if self.prefix.is_whitespace() || self.prefix.is_control() {
			return Err(ConfigError::Invalid(format!("prefix {:?} must be a visible character", self.prefix)));
		}
		self.ranking.validate()
	}

	pub fn is_hidden(&self, key: &str) -> bool {
		self.hidden_keys.contains(key)
	}

	pub fn custom_icon(&self, key: &str) -> Option<&str> {
		self.custom_icons.get(key).map(String::as_str)
	}

	/// Returns false only when the provider is explicitly disabled.
	pub fn provider_enabled(&self, id: &str) -> bool {
		self.providers.get(id).is_none_or(|provider| provider.enabled)
	}
}
