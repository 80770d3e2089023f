//! Readiness sub-scores and their composition

use crate::checks::{CiCheck, Conclusion};
use crate::models::{PullRequest, ScoredPr};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Maximum points per signal
const MAX_CI: u32 = 30;
const NO_CI_SCORE: u32 = 15;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Staleness buckets: (exclusive upper bound in days, score)
const STALENESS_BUCKETS: &[(f64, u32)] = &[(1.0, 20), (3.0, 15), (7.0, 10), (14.0, 5)];

/// Per-signal breakdown of a readiness score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ci: u32,
    pub reviews: u32,
    pub conflicts: u32,
    pub staleness: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Build from the four sub-scores; `total` is always their exact sum.
    pub fn from_parts(ci: u32, reviews: u32, conflicts: u32, staleness: u32) -> Self {
        Self {
            ci,
            reviews,
            conflicts,
            staleness,
            total: ci + reviews + conflicts + staleness,
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_total(self.total)
    }
}

/// Qualitative reading of a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ready,
    Caveats,
    NotReady,
}

impl Verdict {
    pub fn from_total(total: u32) -> Self {
        match total {
            t if t >= 80 => Verdict::Ready,
            t if t >= 50 => Verdict::Caveats,
            _ => Verdict::NotReady,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Ready => "Ready to merge",
            Verdict::Caveats => "Ready with caveats",
            Verdict::NotReady => "Not ready",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ready => write!(f, "ready"),
            Verdict::Caveats => write!(f, "caveats"),
            Verdict::NotReady => write!(f, "not_ready"),
        }
    }
}

/// CI sub-score (0-30), proportional to per-check credit.
///
/// Credits are counted in halves so the ratio stays exact; rounding is
/// half-up on `30 × halves / (2 × n)`.
pub fn score_ci(checks: &[CiCheck]) -> u32 {
    if checks.is_empty() {
        return NO_CI_SCORE;
    }
    let n = checks.len() as u64;
    let halves: u64 = checks
        .iter()
        .map(|c| u64::from(Conclusion::credit_halves(c.conclusion.as_ref())))
        .sum();
    // floor((MAX × halves / (2n)) + 1/2) == floor((MAX × halves + n) / 2n)
    ((u64::from(MAX_CI) * halves + n) / (2 * n)) as u32
}

/// Review sub-score: 30, 10 or 0
pub fn score_reviews(review_decision: &str) -> u32 {
    match review_decision {
        "APPROVED" => 30,
        "CHANGES_REQUESTED" => 0,
        // REVIEW_REQUIRED, no reviews yet, or a decision we don't know
        _ => 10,
    }
}

/// Conflict sub-score: 20, 10 or 0
pub fn score_conflicts(mergeable: &str) -> u32 {
    match mergeable {
        "MERGEABLE" => 20,
        "CONFLICTING" => 0,
        _ => 10,
    }
}

/// Staleness sub-score from the last update time, relative to `now`.
///
/// An unparseable timestamp has no age and scores 0.
pub fn score_staleness(updated_at: &str, now: DateTime<Utc>) -> u32 {
    let Ok(updated) = DateTime::parse_from_rfc3339(updated_at) else {
        debug!("Unparseable updatedAt '{}', scoring staleness as 0", updated_at);
        return 0;
    };
    let age = now.signed_duration_since(updated.with_timezone(&Utc));
    let age_days = age.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY;

    STALENESS_BUCKETS
        .iter()
        .find(|(bound, _)| age_days < *bound)
        .map(|(_, score)| *score)
        .unwrap_or(0)
}

/// Score one pull request at a fixed instant
pub fn compute_score(pr: &PullRequest, now: DateTime<Utc>) -> ScoreBreakdown {
    ScoreBreakdown::from_parts(
        score_ci(&pr.status_check_rollup),
        score_reviews(&pr.review_decision),
        score_conflicts(&pr.mergeable),
        score_staleness(&pr.updated_at, now),
    )
}

/// Score a batch of pull requests against a single `now` snapshot
pub fn score_all(prs: Vec<PullRequest>, now: DateTime<Utc>) -> Vec<ScoredPr> {
    let scored: Vec<ScoredPr> = prs
        .into_iter()
        .map(|pr| {
            let breakdown = compute_score(&pr, now);
            debug!(
                "{}#{}: ci={} reviews={} conflicts={} staleness={} total={}",
                pr.repo,
                pr.number,
                breakdown.ci,
                breakdown.reviews,
                breakdown.conflicts,
                breakdown.staleness,
                breakdown.total
            );
            ScoredPr::new(pr, breakdown)
        })
        .collect();

    let ready = scored
        .iter()
        .filter(|s| s.score_breakdown.verdict() == Verdict::Ready)
        .count();
    info!("Scored {} pull requests ({} ready)", scored.len(), ready);
    scored
}
