//! `gh`-backed [`PrSource`]

use super::{decode_pr_list, decode_review_comments, run_gh, GhError, PrSource};
use crate::models::{PullRequest, RepoConfig, ReviewComment};
use std::time::Duration;
use tracing::debug;

/// Fields requested from `gh pr list --json`
pub const PR_FIELDS: &[&str] = &[
    "number",
    "title",
    "state",
    "headRefName",
    "baseRefName",
    "mergeable",
    "additions",
    "deletions",
    "changedFiles",
    "labels",
    "author",
    "url",
    "createdAt",
    "updatedAt",
    "isDraft",
    "reviewDecision",
    "statusCheckRollup",
];

/// Talks to GitHub through the locally authenticated `gh` CLI
#[derive(Debug, Clone)]
pub struct GhCli {
    limit: usize,
    timeout: Duration,
}

impl GhCli {
    pub fn new(limit: usize, timeout: Duration) -> Self {
        Self { limit, timeout }
    }

    fn pr_list_args(&self, repo: &RepoConfig) -> Vec<String> {
        vec![
            "pr".to_string(),
            "list".to_string(),
            "--repo".to_string(),
            repo.slug(),
            "--state".to_string(),
            "open".to_string(),
            "--json".to_string(),
            PR_FIELDS.join(","),
            "--limit".to_string(),
            self.limit.to_string(),
        ]
    }
}

impl PrSource for GhCli {
    fn list_open_prs(&self, repo: &RepoConfig) -> Result<Vec<PullRequest>, GhError> {
        let stdout = run_gh(&self.pr_list_args(repo), self.timeout)?;
        let prs = decode_pr_list(&stdout, repo)?;
        debug!("{}: {} open pull requests", repo, prs.len());
        Ok(prs)
    }

    fn review_comments(
        &self,
        repo: &RepoConfig,
        number: u64,
    ) -> Result<Vec<ReviewComment>, GhError> {
        let args = vec![
            "api".to_string(),
            format!("repos/{}/{}/pulls/{}/comments", repo.owner, repo.repo, number),
        ];
        let stdout = run_gh(&args, self.timeout)?;
        decode_review_comments(&stdout)
    }

    fn conversation_comments(&self, repo: &RepoConfig, number: u64) -> Result<String, GhError> {
        let args = vec![
            "pr".to_string(),
            "view".to_string(),
            number.to_string(),
            "--repo".to_string(),
            repo.slug(),
            "--comments".to_string(),
        ];
        Ok(run_gh(&args, self.timeout)?.trim().to_string())
    }
}
