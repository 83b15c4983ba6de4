use std::path::PathBuf;

use parking_lot::RwLock;

use crate::{PaletteConfig, Result};

/// Persistence collaborator the palette engine re-reads on invalidation.
pub trait ConfigSource: Send + Sync {
	fn load(&self) -> Result<PaletteConfig>;
}

/// In-memory configuration, replaceable at runtime.
#[derive(Debug, Default)]
pub struct StaticConfig {
	config: RwLock<PaletteConfig>,
}

impl StaticConfig {
	pub fn new(config: PaletteConfig) -> Self {
		Self {
			config: RwLock::new(config),
		}
	}

	/// Replaces the stored configuration. Takes effect on the next load.
	pub fn replace(&self, config: PaletteConfig) {
		*self.config.write() = config;
	}
}

impl ConfigSource for StaticConfig {
	fn load(&self) -> Result<PaletteConfig> {
		let config = self.config.read().clone();
		config.validate()?;
		Ok(config)
	}
}

/// Configuration read from a TOML file on every load.
///
/// A missing file loads as [`PaletteConfig::default`].
#[derive(Debug, Clone)]
pub struct FileConfig {
	path: PathBuf,
}

impl FileConfig {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &std::path::Path {
		&self.path
	}
}

impl ConfigSource for FileConfig {
	fn load(&self) -> Result<PaletteConfig> {
		if !self.path.exists() {
			return Ok(PaletteConfig::default());
		}
		PaletteConfig::load(&self.path)
	}
}
