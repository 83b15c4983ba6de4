//! Query session state machine.
//!
//! The session owns the raw input, the command-mode flag, the generation
//! clock and the last committed result set. It never awaits; the engine asks
//! it for a [`Transition`], runs the async part of the query outside any
//! lock, then offers the results back through [`QuerySession::commit`].

use cmdbar_config::PaletteConfig;
use cmdbar_worker::{GenerationClock, GenerationTicket};

use crate::rank::RankMode;
use crate::view::PaletteResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
	#[default]
	Inactive,
	/// Input without the reserved prefix, at or above the minimum length.
	FreeQuery,
	/// Reserved prefix with nothing after it.
	PrefixEmpty,
	/// Reserved prefix followed by text.
	PrefixQuery,
}

impl SessionState {
	pub fn is_prefixed(self) -> bool {
		matches!(self, Self::PrefixEmpty | Self::PrefixQuery)
	}

	pub fn rank_mode(self) -> Option<RankMode> {
		match self {
			Self::Inactive => None,
			Self::FreeQuery => Some(RankMode::Free),
			Self::PrefixEmpty => Some(RankMode::PrefixEmpty),
			Self::PrefixQuery => Some(RankMode::PrefixNonEmpty),
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Inactive => "inactive",
			Self::FreeQuery => "free_query",
			Self::PrefixEmpty => "prefix_empty",
			Self::PrefixQuery => "prefix_query",
		}
	}
}

/// Work requested by one input event.
#[derive(Debug, Clone)]
pub struct QueryPlan {
	pub ticket: GenerationTicket,
	pub mode: RankMode,
	/// Text handed to ranking, prefix already stripped.
	pub query: String,
	pub command_mode: bool,
	pub visible_input: String,
}

#[derive(Debug, Clone)]
pub enum Transition {
	/// The session is active and wants results for this plan.
	Query(QueryPlan),
	/// The session is inactive. `ended_session` is set when this event moved
	/// it there from an active state.
	Deactivated { ended_session: bool },
}

#[derive(Debug)]
pub struct QuerySession {
	prefix: char,
	min_query_len: usize,
	state: SessionState,
	input: String,
	clock: GenerationClock,
	results: Option<PaletteResults>,
}

impl QuerySession {
	pub fn new(config: &PaletteConfig) -> Self {
		Self {
			prefix: config.prefix,
			min_query_len: config.ranking.min_query_len,
			state: SessionState::Inactive,
			input: String::new(),
			clock: GenerationClock::new(),
			results: None,
		}
	}

	/// Applies a new configuration to subsequent input events.
	pub fn configure(&mut self, config: &PaletteConfig) {
		self.prefix = config.prefix;
		self.min_query_len = config.ranking.min_query_len;
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	/// Visible input; in command mode this excludes the prefix.
	pub fn input(&self) -> &str {
		&self.input
	}

	pub fn generation(&self) -> u64 {
		self.clock.current()
	}

	pub fn command_mode(&self) -> bool {
		self.state.is_prefixed()
	}

	pub fn results(&self) -> Option<&PaletteResults> {
		self.results.as_ref()
	}

	/// Feeds one host input event.
	///
	/// Outside command mode `raw` is the full input. In command mode the host
	/// has already stripped the prefix, so `raw` is the remainder. Every call
	/// advances the generation, superseding any query still in flight.
	pub fn on_input(&mut self, raw: &str, cancel_requested: bool) -> Transition {
		let from = self.state;
		let (to, visible) = self.next_state(raw, cancel_requested);
		let ticket = self.clock.advance();

		tracing::debug!(from = from.as_str(), to = to.as_str(), generation = ticket.generation(), "palette.session.transition");

		self.state = to;
		self.input = visible.to_string();

		match to.rank_mode() {
			Some(mode) => Transition::Query(QueryPlan {
				ticket,
				mode,
				query: self.input.clone(),
				command_mode: to.is_prefixed(),
				visible_input: self.input.clone(),
			}),
			None => {
				self.results = None;
				Transition::Deactivated {
					ended_session: from != SessionState::Inactive,
				}
			}
		}
	}

	fn next_state<'a>(&self, raw: &'a str, cancel_requested: bool) -> (SessionState, &'a str) {
		if self.state.is_prefixed() {
			return match (raw.is_empty(), cancel_requested) {
				(true, true) => (SessionState::Inactive, ""),
				(true, false) => (SessionState::PrefixEmpty, ""),
				(false, _) => (SessionState::PrefixQuery, raw),
			};
		}

		if let Some(rest) = raw.strip_prefix(self.prefix) {
			let to = if rest.is_empty() { SessionState::PrefixEmpty } else { SessionState::PrefixQuery };
			return (to, rest);
		}

		if !cancel_requested && raw.trim().chars().count() >= self.min_query_len {
			(SessionState::FreeQuery, raw)
		} else {
			(SessionState::Inactive, raw)
		}
	}

	/// Ends the session, dropping any result set and superseding in-flight
	/// queries. Returns whether the session was active.
	pub fn close(&mut self) -> bool {
		let was_active = self.state != SessionState::Inactive;
		let ticket = self.clock.advance();
		if was_active {
			tracing::debug!(from = self.state.as_str(), to = SessionState::Inactive.as_str(), generation = ticket.generation(), "palette.session.transition");
		}
		self.state = SessionState::Inactive;
		self.input.clear();
		self.results = None;
		was_active
	}

	/// Installs `results` as the current set if `ticket` is still current.
	///
	/// Stale results, and results arriving after the session went inactive,
	/// are dropped and `false` is returned.
	pub fn commit(&mut self, ticket: &GenerationTicket, results: PaletteResults) -> bool {
		if ticket.is_stale() || self.state == SessionState::Inactive {
			tracing::debug!(generation = ticket.generation(), current = self.generation(), "palette.query.stale");
			return false;
		}
		self.results = Some(results);
		true
	}
}

impl Default for QuerySession {
	fn default() -> Self {
		Self::new(&PaletteConfig::default())
	}
}
