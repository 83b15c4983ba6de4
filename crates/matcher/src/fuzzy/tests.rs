use proptest::prelude::*;

use super::*;
use crate::r#const::*;

fn kind(target: &str, query: &str) -> MatchKind {
	match_target(target, query, &Scoring::default()).kind
}

#[test]
fn test_empty_query_never_matches() {
	assert_eq!(score("Open Settings", ""), 0);
	assert_eq!(kind("Open Settings", ""), MatchKind::None);
}

#[test]
fn test_query_longer_than_target() {
	assert_eq!(score("ab", "abc"), 0);
	assert_eq!(score("", "a"), 0);
}

#[test]
fn test_score_exact_match() {
	assert_eq!(score("Copy", "copy"), EXACT_MATCH_SCORE);
	assert_eq!(score("copy", "COPY"), EXACT_MATCH_SCORE);
	assert_eq!(kind("Copy", "copy"), MatchKind::Exact);
}

#[test]
fn test_score_prefix() {
	assert_eq!(score("Copy Link", "cop"), PREFIX_SCORE + 3);
	assert_eq!(score("Copy Link", "copy l"), PREFIX_SCORE + 6);
	assert!(score("Copy Link", "copy l") > score("Copy Link", "cop"));
}

#[test]
fn test_score_initials() {
	assert_eq!(score("Open New Tab", "ont"), INITIALS_SCORE + 3);
	assert_eq!(score("open-new_tab", "ONT"), INITIALS_SCORE + 3);
	assert_eq!(kind("Open  New Tab", "ont"), MatchKind::Initials);
}

#[test]
fn test_score_subsequence_boundary_and_run() {
	// s: 10 + 8 boundary - 5 capped gap; e, t, t: consecutive runs of 1, 2, 3.
	assert_eq!(score("Open Settings", "sett"), 13 + 15 + 20 + 25);
	assert_eq!(kind("Open Settings", "sett"), MatchKind::Subsequence);
}

#[test]
fn test_score_subsequence_gaps() {
	assert_eq!(score("xaxbxc", "abc"), 3 * (MATCH_BONUS - GAP_PENALTY));
}

#[test]
fn test_gap_penalty_is_bounded() {
	let near = format!("a{}z", "x".repeat(10));
	let far = format!("a{}z", "x".repeat(200));
	assert_eq!(score(&near, "az"), score(&far, "az"));
	assert_eq!(score(&far, "az"), MATCH_BONUS + BOUNDARY_BONUS + MATCH_BONUS - GAP_PENALTY_CAP);
}

#[test]
fn test_subsequence_clamped_below_initials() {
	assert_eq!(score("xabcdefgh", "abcdefg"), SUBSEQUENCE_MAX);
	assert!(score("xabcdefgh", "abcdefg") < INITIALS_SCORE);
}

#[test]
fn test_no_match() {
	assert_eq!(score("abc", "zz"), 0);
	assert_eq!(score("ba", "ab"), 0);
	assert_eq!(score("Open Downloads", "sett"), 0);
}

#[test]
fn test_tier_ordering() {
	let exact = score("tabs", "tabs");
	let prefix = score("tabs list", "tabs");
	let initials = score("toggle all bookmark sidebar", "tabs");
	let subsequence = score("the active bar set", "tabs");
	assert!(exact > prefix);
	assert!(prefix > initials);
	assert!(initials > subsequence);
	assert!(subsequence > 0);
}

#[test]
fn test_custom_delimiters() {
	let scoring = Scoring {
		delimiters: "/",
		..Scoring::default()
	};
	assert_eq!(match_target("tab/group", "tg", &scoring).kind, MatchKind::Initials);
	assert_eq!(match_target("tab-group", "tg", &scoring).kind, MatchKind::Subsequence);
}

proptest! {
	#[test]
	fn prop_longer_query_scores_zero(target in "[a-zA-Z _-]{0,12}", extra in "[a-z]{1,6}") {
		let query = format!("{target}{extra}");
		prop_assert_eq!(score(&target, &query), 0);
	}

	#[test]
	fn prop_score_is_deterministic(target in "[a-zA-Z _-]{0,16}", query in "[a-z]{0,5}") {
		prop_assert_eq!(score(&target, &query), score(&target, &query));
	}

	#[test]
	fn prop_match_kind_agrees_with_score(target in "[a-zA-Z _-]{0,16}", query in "[a-z]{0,5}") {
		let m = match_target(&target, &query, &Scoring::default());
		prop_assert_eq!(m.is_match(), m.score > 0);
	}
}
