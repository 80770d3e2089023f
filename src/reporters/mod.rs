//! Output reporters for pr-ready
//!
//! Supports two output formats:
//! - `text` - Terminal output with colors and emoji
//! - `json` - Machine-readable JSON for scripts and agents

mod json;
mod text;

use crate::github::Discussion;
use crate::models::{ReviewComment, ScoredPr};
use crate::scoring::Verdict;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Scored list of open PRs plus per-repo fetch errors
#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub prs: Vec<ScoredPr>,
    pub errors: Vec<String>,
}

/// One scored PR with its review discussion
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailReport {
    #[serde(flatten)]
    pub pr: ScoredPr,
    pub review_comments: Vec<ReviewComment>,
    pub conversation_comments: String,
    pub verdict: Verdict,
}

impl DetailReport {
    pub fn new(pr: ScoredPr, discussion: Discussion) -> Self {
        let verdict = pr.score_breakdown.verdict();
        Self {
            pr,
            review_comments: discussion.review_comments,
            conversation_comments: discussion.conversation,
            verdict,
        }
    }
}

/// Render the PR list in the specified format
pub fn render_list(report: &ListReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_list(report)),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a single PR in the specified format
pub fn render_detail(report: &DetailReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_detail(report)),
        OutputFormat::Json => json::render(report),
    }
}
