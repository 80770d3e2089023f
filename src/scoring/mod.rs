//! Merge-Readiness Scoring
//!
//! Scores each open pull request from 0 to 100 from four independent
//! signals. Every sub-score is total: unknown or missing input falls back
//! to a neutral credit instead of failing, so a score is always shown.
//!
//! # Scoring Formula
//!
//! ```text
//! Total = CI (0-30) + Reviews (0-30) + Conflicts (0-20) + Staleness (0-20)
//! ```
//!
//! # CI (0-30)
//!
//! - No checks configured: 15
//! - Otherwise each check earns 1 (SUCCESS/NEUTRAL/SKIPPED), 0 (FAILURE/
//!   CANCELLED/TIMED_OUT/ACTION_REQUIRED) or 0.5 (anything else, incl. pending)
//! - Score = round_half_up(30 × credits / checks)
//!
//! # Reviews (0-30)
//!
//! - APPROVED: 30, CHANGES_REQUESTED: 0, anything else: 10
//!
//! # Conflicts (0-20)
//!
//! - MERGEABLE: 20, CONFLICTING: 0, anything else: 10
//!
//! # Staleness (0-20)
//!
//! Age since last update, each bound exclusive:
//! `< 1d` 20, `< 3d` 15, `< 7d` 10, `< 14d` 5, otherwise 0.
//!
//! # Example
//!
//! Two passing checks, one failed, one running → 30 × 2.5 / 4 = 18.75 → 19.

mod readiness;
mod sort;

pub use readiness::{
    compute_score, score_all, score_ci, score_conflicts, score_reviews, score_staleness,
    ScoreBreakdown, Verdict,
};
pub use sort::{sort_scored, SortKey};
