//! Bounded most-recently-used list of executed command keys.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

/// Recency tracker shared between the dispatcher (writer) and ranking (readers).
pub type SharedRecency = Arc<RwLock<RecencyTracker>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyTracker {
	entries: VecDeque<String>,
	capacity: usize,
}

impl RecencyTracker {
	/// Creates an empty tracker. A zero capacity is raised to one.
	pub fn new(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			entries: VecDeque::with_capacity(capacity),
			capacity,
		}
	}

	/// Seeds a tracker from a most-recent-first list.
	///
	/// Later duplicates are dropped and the list is cut to `capacity`.
	pub fn with_entries<I, S>(capacity: usize, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut tracker = Self::new(capacity);
		for key in keys {
			let key = key.into();
			if tracker.entries.len() == tracker.capacity {
				break;
			}
			if !tracker.entries.contains(&key) {
				tracker.entries.push_back(key);
			}
		}
		tracker
	}

	/// Moves `key` to the front, evicting the oldest entry past capacity.
	pub fn record(&mut self, key: &str) {
		if let Some(idx) = self.position(key) {
			if let Some(existing) = self.entries.remove(idx) {
				self.entries.push_front(existing);
			}
			return;
		}
		self.entries.push_front(key.to_string());
		self.entries.truncate(self.capacity);
	}

	/// Returns the 0-based position of `key`, most recent first.
	pub fn position(&self, key: &str) -> Option<usize> {
		self.entries.iter().position(|entry| entry == key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.position(key).is_some()
	}

	pub fn remove(&mut self, key: &str) -> bool {
		match self.position(key) {
			Some(idx) => self.entries.remove(idx).is_some(),
			None => false,
		}
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Changes the capacity, dropping the oldest entries if it shrinks.
	pub fn set_capacity(&mut self, capacity: usize) {
		self.capacity = capacity.max(1);
		self.entries.truncate(self.capacity);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}

	/// Returns the keys most-recent-first for persistence.
	pub fn snapshot(&self) -> Vec<String> {
		self.entries.iter().cloned().collect()
	}
}

impl Default for RecencyTracker {
	fn default() -> Self {
		Self::new(cmdbar_config::RankingConfig::default().recency_capacity)
	}
}
