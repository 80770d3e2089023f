//! Provider conclusion vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome reported for one CI check.
///
/// Covers the tokens GitHub emits for check-runs. Anything else is kept
/// verbatim in [`Conclusion::Other`] so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Conclusion {
    Success,
    Failure,
    Neutral,
    Skipped,
    Cancelled,
    TimedOut,
    ActionRequired,
    Stale,
    StartupFailure,
    Other(String),
}

impl Conclusion {
    /// Parse a provider token. Matching is exact: check-run conclusions
    /// arrive upper-cased already.
    pub fn from_token(token: &str) -> Self {
        match token {
            "SUCCESS" => Conclusion::Success,
            "FAILURE" => Conclusion::Failure,
            "NEUTRAL" => Conclusion::Neutral,
            "SKIPPED" => Conclusion::Skipped,
            "CANCELLED" => Conclusion::Cancelled,
            "TIMED_OUT" => Conclusion::TimedOut,
            "ACTION_REQUIRED" => Conclusion::ActionRequired,
            "STALE" => Conclusion::Stale,
            "STARTUP_FAILURE" => Conclusion::StartupFailure,
            other => Conclusion::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Conclusion::Success => "SUCCESS",
            Conclusion::Failure => "FAILURE",
            Conclusion::Neutral => "NEUTRAL",
            Conclusion::Skipped => "SKIPPED",
            Conclusion::Cancelled => "CANCELLED",
            Conclusion::TimedOut => "TIMED_OUT",
            Conclusion::ActionRequired => "ACTION_REQUIRED",
            Conclusion::Stale => "STALE",
            Conclusion::StartupFailure => "STARTUP_FAILURE",
            Conclusion::Other(s) => s,
        }
    }

    /// Counts as a green check
    pub fn is_passing(&self) -> bool {
        matches!(
            self,
            Conclusion::Success | Conclusion::Neutral | Conclusion::Skipped
        )
    }

    /// Counts as a red check
    pub fn is_failing(&self) -> bool {
        matches!(
            self,
            Conclusion::Failure
                | Conclusion::Cancelled
                | Conclusion::TimedOut
                | Conclusion::ActionRequired
        )
    }

    /// Credit toward the CI sub-score, in half points (2 = full, 1 = half, 0 = none).
    ///
    /// `STALE`, `STARTUP_FAILURE` and unknown tokens land in the middle with
    /// pending checks.
    pub fn credit_halves(conclusion: Option<&Conclusion>) -> u32 {
        match conclusion {
            Some(c) if c.is_passing() => 2,
            Some(c) if c.is_failing() => 0,
            _ => 1,
        }
    }
}

impl From<String> for Conclusion {
    fn from(s: String) -> Self {
        Conclusion::from_token(&s)
    }
}

impl From<Conclusion> for String {
    fn from(c: Conclusion) -> Self {
        match c {
            Conclusion::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens_round_trip_through_display() {
        for token in [
            "SUCCESS",
            "FAILURE",
            "NEUTRAL",
            "SKIPPED",
            "CANCELLED",
            "TIMED_OUT",
            "ACTION_REQUIRED",
            "STALE",
            "STARTUP_FAILURE",
        ] {
            let c = Conclusion::from_token(token);
            assert!(!matches!(c, Conclusion::Other(_)), "{token} parsed as Other");
            assert_eq!(c.to_string(), token);
        }
    }

    #[test]
    fn test_unknown_token_is_preserved() {
        let c = Conclusion::from_token("EXPLODED");
        assert_eq!(c, Conclusion::Other("EXPLODED".to_string()));
        assert_eq!(c.as_str(), "EXPLODED");
    }

    #[test]
    fn test_lowercase_is_not_normalized() {
        // Check-run tokens pass through untouched; only status-contexts are upper-cased.
        assert_eq!(
            Conclusion::from_token("success"),
            Conclusion::Other("success".to_string())
        );
    }

    #[test]
    fn test_credit_halves() {
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::Success)), 2);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::Neutral)), 2);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::Skipped)), 2);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::Failure)), 0);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::Cancelled)), 0);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::TimedOut)), 0);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::ActionRequired)), 0);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::Stale)), 1);
        assert_eq!(Conclusion::credit_halves(Some(&Conclusion::StartupFailure)), 1);
        assert_eq!(Conclusion::credit_halves(None), 1);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Conclusion::TimedOut).unwrap();
        assert_eq!(json, "\"TIMED_OUT\"");
        let back: Conclusion = serde_json::from_str("\"NEUTRAL\"").unwrap();
        assert_eq!(back, Conclusion::Neutral);
    }
}
