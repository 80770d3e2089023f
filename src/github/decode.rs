//! Decoding of `gh` JSON payloads

use super::GhError;
use crate::checks::{normalize_checks, RawCheckEntry};
use crate::models::{PullRequest, RepoConfig, ReviewComment};
use serde::Deserialize;

/// Login GitHub shows for deleted accounts
const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Deserialize)]
struct RawLogin {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
}

/// One element of `gh pr list --json ...`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPr {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    head_ref_name: String,
    #[serde(default)]
    base_ref_name: String,
    mergeable: Option<String>,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    changed_files: u64,
    labels: Option<Vec<RawLabel>>,
    author: Option<RawLogin>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    updated_at: String,
    #[serde(default)]
    is_draft: bool,
    review_decision: Option<String>,
    status_check_rollup: Option<Vec<RawCheckEntry>>,
}

impl RawPr {
    fn into_pull_request(self, repo: &RepoConfig) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            state: self.state,
            head_ref_name: self.head_ref_name,
            base_ref_name: self.base_ref_name,
            mergeable: self.mergeable.unwrap_or_else(|| "UNKNOWN".to_string()),
            additions: self.additions,
            deletions: self.deletions,
            changed_files: self.changed_files,
            labels: self
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|l| l.name)
                .collect(),
            author: self
                .author
                .map(|a| a.login)
                .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            url: self.url,
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_draft: self.is_draft,
            review_decision: self.review_decision.unwrap_or_default(),
            status_check_rollup: normalize_checks(self.status_check_rollup.unwrap_or_default()),
            repo: repo.clone(),
        }
    }
}

/// Decode `gh pr list --json` output for one repository
pub fn decode_pr_list(json: &str, repo: &RepoConfig) -> Result<Vec<PullRequest>, GhError> {
    let raws: Vec<RawPr> = serde_json::from_str(json)?;
    Ok(raws.into_iter().map(|r| r.into_pull_request(repo)).collect())
}

/// One element of `gh api repos/{o}/{r}/pulls/{n}/comments` (REST, snake_case)
#[derive(Debug, Deserialize)]
struct RawReviewComment {
    #[serde(default)]
    path: String,
    line: Option<u64>,
    original_line: Option<u64>,
    #[serde(default)]
    body: String,
    user: Option<RawLogin>,
    #[serde(default)]
    created_at: String,
}

/// Decode inline review comments. Outdated comments have no `line`, so
/// their `original_line` is used instead.
pub fn decode_review_comments(json: &str) -> Result<Vec<ReviewComment>, GhError> {
    let raws: Vec<RawReviewComment> = serde_json::from_str(json)?;
    Ok(raws
        .into_iter()
        .map(|c| ReviewComment {
            path: c.path,
            line: c.line.or(c.original_line),
            body: c.body,
            author: c
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            created_at: c.created_at,
        })
        .collect())
}
