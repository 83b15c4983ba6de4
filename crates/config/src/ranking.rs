use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Tuning constants for the ranking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
	/// Minimum input length (in chars) before free-mode ranking runs.
	pub min_query_len: usize,
	/// Candidates scoring below this are dropped.
	pub min_score: f64,
	/// Result cap outside command mode.
	pub free_limit: usize,
	/// Result cap in command mode.
	pub prefix_limit: usize,
	pub label_weight: f64,
	pub tag_weight: f64,
	/// Recency bonus per slot: `(capacity - position) * recency_factor`.
	pub recency_factor: f64,
	/// Maximum number of keys kept in the recency list.
	pub recency_capacity: usize,
}

impl Default for RankingConfig {
	fn default() -> Self {
		Self {
			min_query_len: 3,
			min_score: 1.0,
			free_limit: 6,
			prefix_limit: 50,
			label_weight: 1.5,
			tag_weight: 0.5,
			recency_factor: 2.0,
			recency_capacity: 20,
		}
	}
}

impl RankingConfig {
	pub(crate) fn validate(&self) -> Result<()> {
		if self.recency_capacity == 0 {
			return Err(ConfigError::Invalid("ranking.recency_capacity must be at least 1".into()));
		}
		if self.free_limit == 0 || self.prefix_limit == 0 {
			return Err(ConfigError::Invalid("ranking result limits must be at least 1".into()));
		}
		for (name, value) in [
			("min_score", self.min_score),
			("label_weight", self.label_weight),
			("tag_weight", self.tag_weight),
			("recency_factor", self.recency_factor),
		] {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigError::Invalid(format!("ranking.{name} must be a finite non-negative number, got {value}")));
			}
		}
		Ok(())
	}
}
