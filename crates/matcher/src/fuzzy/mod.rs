//! Rule-ordered fuzzy scoring of one query against one target.

use crate::Scoring;

/// Which rule produced a [`Match`]. Variants are ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
	None,
	Subsequence,
	Initials,
	Prefix,
	Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
	pub kind: MatchKind,
	pub score: u16,
}

impl Match {
	pub const NONE: Self = Self {
		kind: MatchKind::None,
		score: 0,
	};

	pub fn is_match(&self) -> bool {
		self.kind != MatchKind::None
	}
}

/// Scores `query` against `target` with default [`Scoring`].
pub fn score(target: &str, query: &str) -> u16 {
	match_target(target, query, &Scoring::default()).score
}

/// Classifies and scores `query` against `target`. The first applicable rule wins.
pub fn match_target(target: &str, query: &str, scoring: &Scoring) -> Match {
	let needle = lowercase(query);
	let haystack = lowercase(target);

	if needle.is_empty() || needle.len() > haystack.len() {
		return Match::NONE;
	}

	let len = u16::try_from(needle.len()).unwrap_or(u16::MAX);

	if needle == haystack {
		return Match {
			kind: MatchKind::Exact,
			score: scoring.exact_score,
		};
	}

	if haystack.starts_with(&needle) {
		return Match {
			kind: MatchKind::Prefix,
			score: scoring.prefix_score.saturating_add(len),
		};
	}

	if initials(&haystack, scoring) == needle {
		return Match {
			kind: MatchKind::Initials,
			score: scoring.initials_score.saturating_add(len),
		};
	}

	match subsequence(&needle, &haystack, scoring) {
		Some(score) => Match {
			kind: MatchKind::Subsequence,
			score,
		},
		None => Match::NONE,
	}
}

fn lowercase(s: &str) -> Vec<char> {
	s.chars().flat_map(char::to_lowercase).collect()
}

fn initials(haystack: &[char], scoring: &Scoring) -> Vec<char> {
	haystack
		.split(|&ch| scoring.is_delimiter(ch))
		.filter_map(|word| word.first().copied())
		.collect()
}

/// Greedy left-to-right scan. Returns `None` unless every needle char is consumed.
fn subsequence(needle: &[char], haystack: &[char], scoring: &Scoring) -> Option<u16> {
	let mut total: i32 = 0;
	let mut next = 0;
	let mut prev_match: Option<usize> = None;
	let mut run: u16 = 0;

	for (idx, &ch) in haystack.iter().enumerate() {
		if next == needle.len() {
			break;
		}
		if ch != needle[next] {
			continue;
		}

		let gap = match prev_match {
			Some(prev) => idx - prev - 1,
			None => idx,
		};
		run = if prev_match.is_some() && gap == 0 { run.saturating_add(1) } else { 0 };

		let mut bonus = i32::from(scoring.match_bonus);
		if idx == 0 || scoring.is_delimiter(haystack[idx - 1]) {
			bonus += i32::from(scoring.boundary_bonus);
		}
		bonus += i32::from(scoring.consecutive_bonus) * i32::from(run.min(scoring.consecutive_run_cap));

		let penalty = i32::try_from(gap)
			.unwrap_or(i32::MAX)
			.saturating_mul(i32::from(scoring.gap_penalty))
			.min(i32::from(scoring.gap_penalty_cap));

		total += bonus - penalty;
		prev_match = Some(idx);
		next += 1;
	}

	if next < needle.len() {
		return None;
	}

	let clamped = total.clamp(1, i32::from(scoring.subsequence_max.max(1)));
	u16::try_from(clamped).ok()
}

#[cfg(test)]
mod tests;
