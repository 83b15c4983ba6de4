use crate::r#const::*;

/// Tunable constants for [`crate::match_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
	pub exact_score: u16,
	pub prefix_score: u16,
	pub initials_score: u16,

	pub match_bonus: u16,
	pub boundary_bonus: u16,
	pub consecutive_bonus: u16,
	pub consecutive_run_cap: u16,
	pub gap_penalty: u16,
	pub gap_penalty_cap: u16,
	pub subsequence_max: u16,

	/// Characters that split words, in addition to whitespace.
	pub delimiters: &'static str,
}

impl Default for Scoring {
	fn default() -> Self {
		Scoring {
			exact_score: EXACT_MATCH_SCORE,
			prefix_score: PREFIX_SCORE,
			initials_score: INITIALS_SCORE,

			match_bonus: MATCH_BONUS,
			boundary_bonus: BOUNDARY_BONUS,
			consecutive_bonus: CONSECUTIVE_BONUS,
			consecutive_run_cap: CONSECUTIVE_RUN_CAP,
			gap_penalty: GAP_PENALTY,
			gap_penalty_cap: GAP_PENALTY_CAP,
			subsequence_max: SUBSEQUENCE_MAX,

			delimiters: DELIMITERS,
		}
	}
}

impl Scoring {
	#[inline]
	pub(crate) fn is_delimiter(&self, ch: char) -> bool {
		ch.is_whitespace() || self.delimiters.contains(ch)
	}
}
