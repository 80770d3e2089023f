//! Dashboard pipeline
//!
//! Orchestrates one refresh pass:
//! 1. Fetch open PRs from every repository
//! 2. Drop bot-authored PRs (list view only)
//! 3. Score everything against a single `now`
//! 4. Sort for display
//!
//! The detail view reuses the same fetch, then adds review discussion.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::github::{fetch_discussion, list_all_open_prs, FetchError, PrSource};
use crate::models::{RepoConfig, ScoredPr};
use crate::reporters::{DetailReport, ListReport};
use crate::scoring::{compute_score, score_all, sort_scored, SortKey};

/// Errors from looking up a single PR
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("PR #{number} not found in {searched}")]
    NotFound { number: u64, searched: String },

    #[error("PR #{number} exists in multiple repos: {found}\nUse --repo to disambiguate (e.g. --repo {suggestion})")]
    Ambiguous {
        number: u64,
        found: String,
        suggestion: String,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

fn slugs<'a>(repos: impl IntoIterator<Item = &'a RepoConfig>) -> String {
    repos
        .into_iter()
        .map(RepoConfig::slug)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fetch-score-sort pipeline over a [`PrSource`].
pub struct Pipeline<'a> {
    source: &'a dyn PrSource,
    sort: SortKey,
    hide_bots: bool,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with default ordering (by score) and bots hidden.
    pub fn new(source: &'a dyn PrSource) -> Self {
        Self {
            source,
            sort: SortKey::default(),
            hide_bots: true,
        }
    }

    /// Set list ordering.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Include or exclude bot-authored PRs from the list.
    pub fn hide_bots(mut self, hide: bool) -> Self {
        self.hide_bots = hide;
        self
    }

    /// Build the scored PR list.
    ///
    /// Partial fetch failures end up in [`ListReport::errors`]; only a
    /// total failure is an error.
    pub fn list(&self, repos: &[RepoConfig], now: DateTime<Utc>) -> Result<ListReport, FetchError> {
        let all = list_all_open_prs(self.source, repos)?;

        let fetched = all.prs.len();
        let prs: Vec<_> = all
            .prs
            .into_iter()
            .filter(|pr| !(self.hide_bots && pr.is_bot()))
            .collect();
        if prs.len() < fetched {
            debug!("Hid {} bot PRs", fetched - prs.len());
        }

        let mut scored = score_all(prs, now);
        sort_scored(&mut scored, self.sort);

        info!("Listing {} PRs sorted by {:?}", scored.len(), self.sort);
        Ok(ListReport {
            prs: scored,
            errors: all.errors,
        })
    }

    /// Find PR `number` across `repos`, score it and attach its discussion.
    ///
    /// With more than one repository searched, a number that matches in
    /// several of them is ambiguous. A single repository (`--repo`) takes
    /// the first match.
    pub fn detail(
        &self,
        repos: &[RepoConfig],
        number: u64,
        now: DateTime<Utc>,
    ) -> Result<DetailReport, LookupError> {
        let all = list_all_open_prs(self.source, repos)?;
        let mut matches: Vec<_> = all.prs.into_iter().filter(|p| p.number == number).collect();

        if matches.is_empty() {
            return Err(LookupError::NotFound {
                number,
                searched: slugs(repos),
            });
        }
        if matches.len() > 1 && repos.len() > 1 {
            return Err(LookupError::Ambiguous {
                number,
                found: slugs(matches.iter().map(|p| &p.repo)),
                suggestion: matches[0].repo.slug(),
            });
        }

        let pr = matches.swap_remove(0);
        let breakdown = compute_score(&pr, now);
        let discussion = fetch_discussion(self.source, &pr.repo, pr.number);
        debug!(
            "{}#{}: {} review comments",
            pr.repo,
            pr.number,
            discussion.review_comments.len()
        );
        Ok(DetailReport::new(ScoredPr::new(pr, breakdown), discussion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GhError;
    use crate::models::tests::sample_pr;
    use crate::models::{PullRequest, ReviewComment};
    use crate::scoring::Verdict;

    /// Canned PRs keyed by repository name
    struct CannedSource {
        prs: Vec<PullRequest>,
    }

    impl PrSource for CannedSource {
        fn list_open_prs(&self, repo: &RepoConfig) -> Result<Vec<PullRequest>, GhError> {
            if repo.repo == "broken" {
                return Err(GhError::NotInstalled);
            }
            Ok(self.prs.iter().filter(|p| &p.repo == repo).cloned().collect())
        }

        fn review_comments(&self, _repo: &RepoConfig, _number: u64) -> Result<Vec<ReviewComment>, GhError> {
            Ok(vec![])
        }

        fn conversation_comments(&self, repo: &RepoConfig, number: u64) -> Result<String, GhError> {
            Ok(format!("conversation for {}#{}", repo, number))
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-02-20T12:00:00Z".parse().unwrap()
    }

    fn pr_in(repo: &str, number: u64) -> PullRequest {
        let mut pr = sample_pr(number);
        pr.repo = RepoConfig::new("acme", repo);
        pr
    }

    fn source() -> CannedSource {
        let mut conflicted = pr_in("widgets", 2);
        conflicted.mergeable = "CONFLICTING".to_string();
        let mut bot = pr_in("widgets", 3);
        bot.author = "dependabot[bot]".to_string();
        CannedSource {
            prs: vec![conflicted, pr_in("widgets", 1), bot, pr_in("gadgets", 1)],
        }
    }

    fn repos() -> Vec<RepoConfig> {
        vec![
            RepoConfig::new("acme", "widgets"),
            RepoConfig::new("acme", "gadgets"),
        ]
    }

    #[test]
    fn test_list_hides_bots_and_sorts_by_score() {
        let source = source();
        let report = Pipeline::new(&source).list(&repos(), now()).unwrap();
        let numbers: Vec<u64> = report.prs.iter().map(|p| p.pr.number).collect();
        // The conflicted PR scores lower and sinks to the bottom
        assert_eq!(numbers, vec![1, 1, 2]);
        assert!(report.prs.iter().all(|p| !p.pr.is_bot()));
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_list_can_show_bots() {
        let source = source();
        let report = Pipeline::new(&source)
            .hide_bots(false)
            .list(&repos(), now())
            .unwrap();
        assert_eq!(report.prs.len(), 4);
    }

    #[test]
    fn test_list_keeps_partial_errors() {
        let source = source();
        let mut repos = repos();
        repos.push(RepoConfig::new("acme", "broken"));
        let report = Pipeline::new(&source).list(&repos, now()).unwrap();
        assert_eq!(report.prs.len(), 3);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("broken: "));
    }

    #[test]
    fn test_detail_found() {
        let source = source();
        let report = Pipeline::new(&source)
            .detail(&[RepoConfig::new("acme", "widgets")], 1, now())
            .unwrap();
        assert_eq!(report.pr.pr.number, 1);
        // No CI configured: 15 + 30 + 20 + 20
        assert_eq!(report.pr.score, 85);
        assert_eq!(report.verdict, Verdict::Ready);
        assert_eq!(report.conversation_comments, "conversation for acme/widgets#1");
    }

    #[test]
    fn test_detail_not_found() {
        let source = source();
        let err = Pipeline::new(&source).detail(&repos(), 99, now()).unwrap_err();
        assert!(matches!(err, LookupError::NotFound { number: 99, .. }));
        assert_eq!(err.to_string(), "PR #99 not found in acme/widgets, acme/gadgets");
    }

    #[test]
    fn test_detail_ambiguous_across_repos() {
        let source = source();
        let err = Pipeline::new(&source).detail(&repos(), 1, now()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("PR #1 exists in multiple repos: acme/widgets, acme/gadgets"));
        assert!(msg.contains("--repo acme/widgets"));
    }

    #[test]
    fn test_detail_total_failure_is_fetch_error() {
        let source = source();
        let err = Pipeline::new(&source)
            .detail(&[RepoConfig::new("acme", "broken")], 1, now())
            .unwrap_err();
        assert!(matches!(err, LookupError::Fetch(_)));
    }
}
