//! Core data models for pr-ready
//!
//! These are the records exchanged between the fetch layer, the scoring
//! engine and the reporters. JSON field names follow GitHub's camelCase so
//! `--json` output lines up with what `gh` itself prints.

use crate::checks::CiCheck;
use crate::scoring::ScoreBreakdown;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A repository to watch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoConfig {
    pub owner: String,
    pub repo: String,
}

impl RepoConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// `owner/repo`, as `gh --repo` expects it
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
                Ok(RepoConfig::new(*owner, *repo))
            }
            _ => Err(format!(
                "invalid repository '{}': expected owner/repo",
                s
            )),
        }
    }
}

/// An open pull request as decoded from the provider, before scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub head_ref_name: String,
    pub base_ref_name: String,
    /// `MERGEABLE`, `CONFLICTING`, `UNKNOWN` or whatever the provider sends next
    pub mergeable: String,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub labels: Vec<String>,
    pub author: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_draft: bool,
    /// `APPROVED`, `CHANGES_REQUESTED`, `REVIEW_REQUIRED` or empty
    pub review_decision: String,
    pub status_check_rollup: Vec<CiCheck>,
    pub repo: RepoConfig,
}

impl PullRequest {
    pub fn is_bot(&self) -> bool {
        is_bot_author(&self.author)
    }
}

/// A pull request with its readiness score attached.
///
/// Rescoring builds a new value; the breakdown is never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPr {
    #[serde(flatten)]
    pub pr: PullRequest,
    /// Same as `score_breakdown.total`, kept flat for sorting consumers
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
}

impl ScoredPr {
    pub fn new(pr: PullRequest, score_breakdown: ScoreBreakdown) -> Self {
        Self {
            pr,
            score: score_breakdown.total,
            score_breakdown,
        }
    }
}

/// An inline review comment on a pull request diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewComment {
    pub path: String,
    pub line: Option<u64>,
    pub body: String,
    pub author: String,
    pub created_at: String,
}

/// Authors treated as automation
pub const BOT_AUTHORS: &[&str] = &[
    "dependabot",
    "dependabot[bot]",
    "snyk-bot",
    "renovate",
    "renovate[bot]",
    "app/dependabot",
    "app/snyk-bot",
    "app/renovate",
];

/// Substrings that mark an author as a dependency bot regardless of suffix
const BOT_MARKERS: &[&str] = &["dependabot", "snyk", "renovate"];

/// Whether a PR author is a dependency-update bot (case-insensitive)
pub fn is_bot_author(author: &str) -> bool {
    let lower = author.to_lowercase();
    BOT_AUTHORS.contains(&lower.as_str()) || BOT_MARKERS.iter().any(|m| lower.contains(m))
}
