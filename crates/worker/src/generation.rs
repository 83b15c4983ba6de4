use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generation clock for superseding query work.
///
/// Generation 0 means "nothing issued yet"; the first [`Self::advance`]
/// returns generation 1.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	current: Arc<AtomicU64>,
}

impl GenerationClock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new generation, making every earlier ticket stale.
	pub fn advance(&self) -> GenerationTicket {
		let generation = self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		GenerationTicket {
			generation,
			clock: Arc::clone(&self.current),
		}
	}

	/// Returns the latest issued generation.
	pub fn current(&self) -> u64 {
		self.current.load(Ordering::Acquire)
	}

	pub fn is_current(&self, generation: u64) -> bool {
		self.current() == generation
	}
}

/// Generation tag carried by async work started for one query.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
	generation: u64,
	clock: Arc<AtomicU64>,
}

impl GenerationTicket {
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true while no newer generation has been issued.
	pub fn is_current(&self) -> bool {
		self.clock.load(Ordering::Acquire) == self.generation
	}

	pub fn is_stale(&self) -> bool {
		!self.is_current()
	}
}
