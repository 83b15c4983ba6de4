//! Default scoring constants used by [`crate::Scoring::default`].

pub const EXACT_MATCH_SCORE: u16 = 200;
pub const PREFIX_SCORE: u16 = 100;
pub const INITIALS_SCORE: u16 = 90;

/// Awarded for every matched character in a subsequence scan.
pub const MATCH_BONUS: u16 = 10;
/// Extra for a match at the start of the target or right after a delimiter.
pub const BOUNDARY_BONUS: u16 = 8;
/// Multiplied by the length of the consecutive run preceding a match.
pub const CONSECUTIVE_BONUS: u16 = 5;
pub const CONSECUTIVE_RUN_CAP: u16 = 4;
/// Subtracted per skipped character since the previous match.
pub const GAP_PENALTY: u16 = 1;
pub const GAP_PENALTY_CAP: u16 = 5;
/// Subsequence scores never reach the initials tier.
pub const SUBSEQUENCE_MAX: u16 = INITIALS_SCORE - 1;

/// Word delimiters in addition to whitespace.
pub const DELIMITERS: &str = "-_";
