//! Lexical scoring for command palette candidates.
//!
//! [`match_target`] classifies a query against one target string using an
//! ordered set of rules where the first rule that applies decides the score:
//!
//! 1. Empty query, or a query longer than the target: no match.
//! 2. Case-insensitive equality: [`Scoring::exact_score`].
//! 3. Case-insensitive prefix: [`Scoring::prefix_score`] plus the query length.
//! 4. Word initials (split on whitespace and [`Scoring::delimiters`]):
//!    [`Scoring::initials_score`] plus the query length.
//! 5. Greedy in-order subsequence scan with boundary, run and gap terms,
//!    clamped below the initials tier.
//!
//! Lengths are counted in `char`s after lowercasing.

pub mod r#const;
mod fuzzy;
mod scoring;

pub use fuzzy::{Match, MatchKind, match_target, score};
pub use scoring::Scoring;
