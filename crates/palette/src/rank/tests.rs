use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::descriptor::{Action, Visibility};
use crate::error::VisibilityError;

fn cmd(key: &str, label: &str) -> Arc<CommandDescriptor> {
	Arc::new(CommandDescriptor::new(key, label, Action::noop()))
}

fn tagged(key: &str, label: &str, tags: &[&str]) -> Arc<CommandDescriptor> {
	Arc::new(CommandDescriptor::new(key, label, Action::noop()).with_tags(tags.iter().copied()))
}

fn keys(commands: &[Arc<CommandDescriptor>]) -> Vec<&str> {
	commands.iter().map(|command| command.key.as_str()).collect()
}

fn no_recency() -> RecencyTracker {
	RecencyTracker::new(20)
}

#[test]
fn prefix_match_beats_missing_subsequence() {
	let store = [cmd("a", "Open Settings"), cmd("b", "Open Downloads")];
	let ranked = Ranker::default().rank("sett", &store, &no_recency(), RankMode::Free);
	assert_eq!(keys(&ranked), vec!["a"]);
}

#[test]
fn free_mode_below_min_length_is_empty() {
	let store: Vec<_> = (0..50).map(|i| cmd(&format!("k{i}"), "Search Engines")).collect();
	let ranker = Ranker::default();
	assert!(ranker.rank("se", &store, &no_recency(), RankMode::Free).is_empty());
	assert!(!ranker.rank("se", &store, &no_recency(), RankMode::PrefixNonEmpty).is_empty());
}

#[test]
fn free_mode_gate_ignores_surrounding_whitespace() {
	let store = [cmd("k", "Search Engines")];
	let ranker = Ranker::default();
	assert!(ranker.rank("     ", &store, &no_recency(), RankMode::Free).is_empty());
	assert!(ranker.rank("  se  ", &store, &no_recency(), RankMode::Free).is_empty());
	assert_eq!(keys(&ranker.rank(" sea ", &store, &no_recency(), RankMode::Free)), vec!["k"]);
}

#[test]
fn prefix_non_empty_searches_single_character() {
	let store = [cmd("a", "Open Settings"), cmd("b", "Reload")];
	let ranked = Ranker::default().rank("r", &store, &no_recency(), RankMode::PrefixNonEmpty);
	assert_eq!(keys(&ranked)[0], "b");
}

#[test]
fn empty_prefix_lists_recent_first() {
	let store = [cmd("a", "Alpha"), cmd("b", "Beta"), cmd("c", "Gamma")];
	let recency = RecencyTracker::with_entries(20, ["b", "a"]);
	let ranked = Ranker::default().rank("", &store, &recency, RankMode::PrefixEmpty);
	assert_eq!(keys(&ranked), vec!["b", "a", "c"]);
}

#[test]
fn empty_prefix_keeps_registration_order_for_duplicate_labels() {
	let store = [cmd("x", "foo"), cmd("y", "foo")];
	let ranked = Ranker::default().rank("", &store, &no_recency(), RankMode::PrefixEmpty);
	assert_eq!(keys(&ranked), vec!["x", "y"]);
}

#[test]
fn empty_prefix_skips_unknown_recent_keys_and_hidden_commands() {
	let hidden = Arc::new(CommandDescriptor::new("h", "Hidden", Action::noop()).with_visibility(Visibility::Fixed(false)));
	let store = [cmd("a", "Alpha"), hidden, cmd("c", "Gamma")];
	let recency = RecencyTracker::with_entries(20, ["gone", "h", "c"]);
	let ranked = Ranker::default().rank("", &store, &recency, RankMode::PrefixEmpty);
	assert_eq!(keys(&ranked), vec!["c", "a"]);
}

#[test]
fn empty_prefix_respects_cap() {
	let store: Vec<_> = (0..10).map(|i| cmd(&format!("k{i}"), "Item")).collect();
	let ranker = Ranker::new(RankingConfig {
		prefix_limit: 3,
		..RankingConfig::default()
	});
	let recency = RecencyTracker::with_entries(20, ["k9"]);
	let ranked = ranker.rank("", &store, &recency, RankMode::PrefixEmpty);
	assert_eq!(keys(&ranked), vec!["k9", "k0", "k1"]);
}

#[test]
fn match_tiers_order_results() {
	let store = [
		tagged("k4", "Sidebar Panel", &["toggle tab strip"]),
		cmd("k3", "Toggle Tab Strip"),
		cmd("k2", "Tabs Sidebar"),
		cmd("k1", "Tabs"),
	];
	let ranked = Ranker::default().rank_scored("tabs", &store, &no_recency(), RankMode::PrefixNonEmpty);
	let order: Vec<_> = ranked.iter().map(|r| r.command.key.as_str()).collect();
	assert_eq!(order, vec!["k1", "k2", "k3", "k4"]);
	assert_eq!(ranked[0].score, 300.0);
	assert_eq!(ranked[1].score, 156.0);
	assert_eq!(ranked[2].score, 82.5);
	assert_eq!(ranked[3].score, 27.5);
}

#[test]
fn key_match_is_unweighted() {
	let store = [cmd("history", "Zzz")];
	let ranker = Ranker::default();
	assert_eq!(ranker.lexical_score("hist", &store[0]), 104.0);
	assert_eq!(keys(&ranker.rank("hist", &store, &no_recency(), RankMode::Free)), vec!["history"]);
}

#[test]
fn recency_breaks_lexical_ties() {
	let store = [cmd("r1", "Reload Page"), cmd("r2", "Reload Page")];
	let recency = RecencyTracker::with_entries(20, ["r2"]);
	let ranker = Ranker::default();
	let ranked = ranker.rank_scored("rel", &store, &recency, RankMode::PrefixNonEmpty);
	assert_eq!(ranked[0].command.key, "r2");
	assert_eq!(ranked[0].score, 103.0 * 1.5 + 40.0);
	assert_eq!(ranker.recency_bonus(&recency, "r2"), 40.0);
	assert_eq!(ranker.recency_bonus(&recency, "r1"), 0.0);
}

#[test]
fn recency_never_promotes_non_matching_command() {
	let store = [cmd("z", "Zzz"), cmd("r", "Reload")];
	let recency = RecencyTracker::with_entries(20, ["z"]);
	let ranked = Ranker::default().rank("rel", &store, &recency, RankMode::PrefixNonEmpty);
	assert_eq!(keys(&ranked), vec!["r"]);
}

#[test]
fn min_score_threshold_filters() {
	let store = [cmd("k1", "Tabs"), cmd("k2", "Tabs Sidebar")];
	let ranker = Ranker::new(RankingConfig {
		min_score: 200.0,
		..RankingConfig::default()
	});
	let ranked = ranker.rank("tabs", &store, &no_recency(), RankMode::PrefixNonEmpty);
	assert_eq!(keys(&ranked), vec!["k1"]);
}

#[test]
fn invisible_and_failing_candidates_are_dropped() {
	let failing = Arc::new(CommandDescriptor::new("f", "Reload Failing", Action::noop()).visible_when(|| Err(VisibilityError::new("boom"))));
	let off = Arc::new(CommandDescriptor::new("o", "Reload Off", Action::noop()).with_visibility(Visibility::Fixed(false)));
	let store = [failing, off, cmd("r", "Reload")];
	let ranked = Ranker::default().rank("reload", &store, &no_recency(), RankMode::PrefixNonEmpty);
	assert_eq!(keys(&ranked), vec!["r"]);
}

#[test]
fn free_mode_truncates_and_keeps_store_order_on_ties() {
	let store: Vec<_> = (0..10).map(|i| cmd(&format!("i{i}"), "Item Entry")).collect();
	let ranked = Ranker::default().rank("item", &store, &no_recency(), RankMode::Free);
	assert_eq!(keys(&ranked), vec!["i0", "i1", "i2", "i3", "i4", "i5"]);
}

#[test]
fn prefix_mode_allows_larger_cap() {
	let store: Vec<_> = (0..10).map(|i| cmd(&format!("i{i}"), "Item Entry")).collect();
	let ranked = Ranker::default().rank("item", &store, &no_recency(), RankMode::PrefixNonEmpty);
	assert_eq!(ranked.len(), 10);
}

proptest! {
	#[test]
	fn prop_rank_is_idempotent(
		labels in proptest::collection::vec("[a-zA-Z ]{1,14}", 0..12),
		query in "[a-z]{1,4}",
		recent in proptest::collection::vec(0usize..12, 0..4),
	) {
		let store: Vec<_> = labels.iter().enumerate().map(|(i, label)| cmd(&format!("k{i}"), label)).collect();
		let recency = RecencyTracker::with_entries(20, recent.iter().map(|i| format!("k{i}")));
		let ranker = Ranker::default();
		for mode in [RankMode::Free, RankMode::PrefixEmpty, RankMode::PrefixNonEmpty] {
			let first = ranker.rank(&query, &store, &recency, mode);
			let second = ranker.rank(&query, &store, &recency, mode);
			prop_assert_eq!(keys(&first), keys(&second));
		}
	}

	#[test]
	fn prop_longer_query_than_label_scores_zero_on_label(label in "[a-zA-Z]{1,8}", extra in "[a-z]{1,4}") {
		let query = format!("{label}{extra}");
		prop_assert_eq!(cmdbar_matcher::score(&label, &query), 0);
	}
}
