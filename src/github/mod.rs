//! GitHub access through the `gh` CLI
//!
//! This module is the fetch side of the dashboard. It shells out to `gh`,
//! decodes the JSON it prints into [`PullRequest`] records (running the
//! check normalizer on the way), and aggregates several repositories in
//! parallel.
//!
//! # Partial failure
//!
//! [`list_all_open_prs`] keeps whatever repositories answered. Each failed
//! repository becomes a `"<repo>: <reason>"` line in [`AllPrs::errors`];
//! only when *every* repository fails is the whole fetch an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use pr_ready::github::{list_all_open_prs, GhCli};
//!
//! let source = GhCli::new(50, Duration::from_secs(60));
//! let all = list_all_open_prs(&source, &repos)?;
//! for err in &all.errors {
//!     eprintln!("warning: {err}");
//! }
//! ```

mod aggregate;
mod client;
mod decode;
mod runner;

pub use aggregate::{fetch_discussion, list_all_open_prs, AllPrs, Discussion};
pub use client::{GhCli, PR_FIELDS};
pub use decode::{decode_pr_list, decode_review_comments};
pub use runner::{run_command, run_gh};

use crate::models::{PullRequest, RepoConfig, ReviewComment};
use thiserror::Error;

/// Errors from a single `gh` invocation
#[derive(Error, Debug)]
pub enum GhError {
    #[error("gh not found. Install the GitHub CLI: https://cli.github.com")]
    NotInstalled,

    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("{program} exited with code {code}: {stderr}")]
    Failed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to decode gh output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a multi-repository fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("All repos failed: {}", .0.join("; "))]
    AllFailed(Vec<String>),
}

/// Anything that can list pull requests for a repository.
///
/// [`GhCli`] is the real implementation; tests substitute canned data.
pub trait PrSource: Send + Sync {
    /// Open pull requests, already normalized
    fn list_open_prs(&self, repo: &RepoConfig) -> Result<Vec<PullRequest>, GhError>;

    /// Inline review comments on a pull request
    fn review_comments(&self, repo: &RepoConfig, number: u64)
        -> Result<Vec<ReviewComment>, GhError>;

    /// The conversation thread as plain text
    fn conversation_comments(&self, repo: &RepoConfig, number: u64) -> Result<String, GhError>;
}
