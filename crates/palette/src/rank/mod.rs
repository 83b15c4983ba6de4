//! Ranking pipeline: score, filter, sort and truncate candidates.
//!
//! Per candidate, the lexical score is
//! `max(label * label_weight, key, tags * tag_weight)` where each term comes
//! from [`cmdbar_matcher::match_target`]. Candidates with a lexical score
//! below `min_score` are dropped before the recency bonus
//! `(capacity - position) * recency_factor` is added, so recency alone never
//! surfaces a non-matching command. Ties keep store order.

use std::sync::Arc;

use cmdbar_config::RankingConfig;
use cmdbar_matcher::{Scoring, match_target};
use rustc_hash::FxHashMap;

use crate::descriptor::CommandDescriptor;
use crate::recency::RecencyTracker;

/// How a query should be ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMode {
	/// No reserved prefix: gated on minimum query length, small result cap.
	Free,
	/// Reserved prefix with nothing after it: recency listing, no scoring.
	PrefixEmpty,
	/// Reserved prefix followed by text: scoring without a length gate.
	PrefixNonEmpty,
}

/// A candidate that survived filtering, with its final score.
#[derive(Debug, Clone)]
pub struct Ranked {
	pub command: Arc<CommandDescriptor>,
	pub score: f64,
}

#[derive(Debug, Clone)]
pub struct Ranker {
	config: RankingConfig,
	scoring: Scoring,
}

impl Ranker {
	pub fn new(config: RankingConfig) -> Self {
		Self {
			config,
			scoring: Scoring::default(),
		}
	}

	pub fn with_scoring(mut self, scoring: Scoring) -> Self {
		self.scoring = scoring;
		self
	}

	pub fn config(&self) -> &RankingConfig {
		&self.config
	}

	/// Returns visible candidates ordered for display and truncated to the
	/// mode's result cap.
	pub fn rank(&self, query: &str, candidates: &[Arc<CommandDescriptor>], recency: &RecencyTracker, mode: RankMode) -> Vec<Arc<CommandDescriptor>> {
		self.rank_scored(query, candidates, recency, mode).into_iter().map(|ranked| ranked.command).collect()
	}

	/// Like [`Self::rank`] but keeps each candidate's final score.
	///
	/// In [`RankMode::PrefixEmpty`] no scoring happens and every score is 0.
	pub fn rank_scored(&self, query: &str, candidates: &[Arc<CommandDescriptor>], recency: &RecencyTracker, mode: RankMode) -> Vec<Ranked> {
		let ranked = match mode {
			RankMode::Free if query.trim().chars().count() < self.config.min_query_len => Vec::new(),
			RankMode::Free => self.scored(query, candidates, recency, self.config.free_limit),
			RankMode::PrefixNonEmpty => self.scored(query, candidates, recency, self.config.prefix_limit),
			RankMode::PrefixEmpty => self.recency_listing(candidates, recency),
		};
		tracing::trace!(?mode, candidates = candidates.len(), ranked = ranked.len(), "palette.rank");
		ranked
	}

	/// Weighted lexical score of one candidate, without recency.
	pub fn lexical_score(&self, query: &str, command: &CommandDescriptor) -> f64 {
		let query = query.trim();
		let label = f64::from(match_target(&command.label, query, &self.scoring).score) * self.config.label_weight;
		let key = f64::from(match_target(&command.key, query, &self.scoring).score);
		let tags = if command.tags.is_empty() {
			0.0
		} else {
			f64::from(match_target(&command.tags_text(), query, &self.scoring).score) * self.config.tag_weight
		};
		label.max(key).max(tags)
	}

	pub fn recency_bonus(&self, recency: &RecencyTracker, key: &str) -> f64 {
		recency
			.position(key)
			.map_or(0.0, |position| recency.capacity().saturating_sub(position) as f64 * self.config.recency_factor)
	}

	fn scored(&self, query: &str, candidates: &[Arc<CommandDescriptor>], recency: &RecencyTracker, limit: usize) -> Vec<Ranked> {
		let mut scored: Vec<(usize, Ranked)> = candidates
			.iter()
			.enumerate()
			.filter_map(|(idx, command)| {
				let lexical = self.lexical_score(query, command);
				if lexical <= 0.0 || lexical < self.config.min_score {
					return None;
				}
				if !command.is_visible() {
					return None;
				}
				let score = lexical + self.recency_bonus(recency, &command.key);
				Some((
					idx,
					Ranked {
						command: Arc::clone(command),
						score,
					},
				))
			})
			.collect();

		scored.sort_by(|(idx_a, a), (idx_b, b)| b.score.total_cmp(&a.score).then_with(|| idx_a.cmp(idx_b)));
		scored.truncate(limit);
		scored.into_iter().map(|(_, ranked)| ranked).collect()
	}

	/// Recent commands first (most recent first), then the rest in store order.
	fn recency_listing(&self, candidates: &[Arc<CommandDescriptor>], recency: &RecencyTracker) -> Vec<Ranked> {
		let limit = self.config.prefix_limit;
		let mut by_key: FxHashMap<&str, usize> = FxHashMap::default();
		for (idx, command) in candidates.iter().enumerate() {
			by_key.entry(command.key.as_str()).or_insert(idx);
		}

		let mut emitted = vec![false; candidates.len()];
		let mut listing = Vec::new();
		let mut push = |idx: usize, listing: &mut Vec<Ranked>| {
			if emitted[idx] {
				return;
			}
			emitted[idx] = true;
			let command = &candidates[idx];
			if command.is_visible() {
				listing.push(Ranked {
					command: Arc::clone(command),
					score: 0.0,
				});
			}
		};

		for key in recency.iter() {
			if listing.len() >= limit {
				break;
			}
			if let Some(&idx) = by_key.get(key) {
				push(idx, &mut listing);
			}
		}
		for idx in 0..candidates.len() {
			if listing.len() >= limit {
				break;
			}
			push(idx, &mut listing);
		}
		listing
	}
}

impl Default for Ranker {
	fn default() -> Self {
		Self::new(RankingConfig::default())
	}
}

#[cfg(test)]
mod tests;
