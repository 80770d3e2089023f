//! Ordering of scored pull requests for display

use crate::models::ScoredPr;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use std::cmp::{Ordering, Reverse};
use std::str::FromStr;

/// How to order the PR list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest readiness first
    #[default]
    Score,
    /// Most recently updated first
    Updated,
    /// Most recently opened first
    Created,
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score" => Ok(SortKey::Score),
            "updated" => Ok(SortKey::Updated),
            "created" => Ok(SortKey::Created),
            _ => Err(anyhow!(
                "Unknown sort key '{}'. Valid keys: score, updated, created",
                s
            )),
        }
    }
}

fn timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Newest first; unparseable timestamps sink to the bottom
fn newest_first(a: &str, b: &str) -> Ordering {
    Reverse(timestamp(a)).cmp(&Reverse(timestamp(b)))
}

/// Sort in place. The sort is stable, so equal keys keep fetch order.
pub fn sort_scored(prs: &mut [ScoredPr], key: SortKey) {
    match key {
        SortKey::Score => prs.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| newest_first(&a.pr.updated_at, &b.pr.updated_at))
        }),
        SortKey::Updated => prs.sort_by(|a, b| newest_first(&a.pr.updated_at, &b.pr.updated_at)),
        SortKey::Created => prs.sort_by(|a, b| newest_first(&a.pr.created_at, &b.pr.created_at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_pr;
    use crate::scoring::ScoreBreakdown;

    fn scored(number: u64, total_ci: u32, updated: &str, created: &str) -> ScoredPr {
        let mut pr = sample_pr(number);
        pr.updated_at = updated.to_string();
        pr.created_at = created.to_string();
        ScoredPr::new(pr, ScoreBreakdown::from_parts(total_ci, 0, 0, 0))
    }

    fn numbers(prs: &[ScoredPr]) -> Vec<u64> {
        prs.iter().map(|s| s.pr.number).collect()
    }

    #[test]
    fn test_sort_by_score_desc_then_recency() {
        let mut prs = vec![
            scored(1, 10, "2026-02-10T00:00:00Z", "2026-01-01T00:00:00Z"),
            scored(2, 30, "2026-02-01T00:00:00Z", "2026-01-02T00:00:00Z"),
            scored(3, 10, "2026-02-15T00:00:00Z", "2026-01-03T00:00:00Z"),
        ];
        sort_scored(&mut prs, SortKey::Score);
        assert_eq!(numbers(&prs), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_updated_and_created() {
        let mut prs = vec![
            scored(1, 0, "2026-02-10T00:00:00Z", "2026-01-03T00:00:00Z"),
            scored(2, 0, "2026-02-12T00:00:00Z", "2026-01-01T00:00:00Z"),
            scored(3, 0, "garbage", "2026-01-02T00:00:00Z"),
        ];
        sort_scored(&mut prs, SortKey::Updated);
        assert_eq!(numbers(&prs), vec![2, 1, 3]);

        sort_scored(&mut prs, SortKey::Created);
        assert_eq!(numbers(&prs), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("score".parse::<SortKey>().unwrap(), SortKey::Score);
        assert_eq!("Updated".parse::<SortKey>().unwrap(), SortKey::Updated);
        assert_eq!("created".parse::<SortKey>().unwrap(), SortKey::Created);
        assert!("size".parse::<SortKey>().is_err());
    }
}
