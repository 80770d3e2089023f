//! Multi-repository fetch

use super::{FetchError, PrSource};
use crate::models::{PullRequest, RepoConfig, ReviewComment};
use rayon::prelude::*;
use tracing::{info, warn};

/// Pull requests from every repository that answered, plus one error line
/// per repository that didn't
#[derive(Debug, Default)]
pub struct AllPrs {
    pub prs: Vec<PullRequest>,
    pub errors: Vec<String>,
}

/// Fetch open PRs for all repositories in parallel.
///
/// Results keep the order of `repos`. Fails only if every repository failed.
pub fn list_all_open_prs(
    source: &dyn PrSource,
    repos: &[RepoConfig],
) -> Result<AllPrs, FetchError> {
    let results: Vec<_> = repos
        .par_iter()
        .map(|repo| (repo, source.list_open_prs(repo)))
        .collect();

    let mut all = AllPrs::default();
    for (repo, result) in results {
        match result {
            Ok(prs) => all.prs.extend(prs),
            Err(e) => {
                warn!("Failed to list PRs for {}: {}", repo, e);
                all.errors.push(format!("{}: {}", repo.repo, e));
            }
        }
    }

    if !repos.is_empty() && all.errors.len() == repos.len() {
        return Err(FetchError::AllFailed(all.errors));
    }

    info!(
        "Fetched {} open PRs from {} repos ({} failed)",
        all.prs.len(),
        repos.len() - all.errors.len(),
        all.errors.len()
    );
    Ok(all)
}

/// Review discussion shown in the detail view
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discussion {
    pub review_comments: Vec<ReviewComment>,
    pub conversation: String,
}

/// Fetch review comments and the conversation side by side.
///
/// Either half degrades to empty on failure; the detail view is still
/// useful without it.
pub fn fetch_discussion(source: &dyn PrSource, repo: &RepoConfig, number: u64) -> Discussion {
    let (review_comments, conversation) = rayon::join(
        || {
            source.review_comments(repo, number).unwrap_or_else(|e| {
                warn!("Could not fetch review comments for {}#{}: {}", repo, number, e);
                Vec::new()
            })
        },
        || {
            source
                .conversation_comments(repo, number)
                .unwrap_or_else(|e| {
                    warn!("Could not fetch conversation for {}#{}: {}", repo, number, e);
                    String::new()
                })
        },
    );
    Discussion {
        review_comments,
        conversation,
    }
}
