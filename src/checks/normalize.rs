//! Raw rollup entries → canonical checks

use super::Conclusion;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `__typename` value GitHub attaches to legacy commit statuses
pub const STATUS_CONTEXT_TYPENAME: &str = "StatusContext";

/// Name given to checks that arrive without one
const UNKNOWN_CHECK_NAME: &str = "unknown";

/// One entry of a `statusCheckRollup` exactly as the provider sent it.
///
/// Every field is optional because the two shapes share nothing. Nothing
/// downstream reads this type; it is classified into [`RawCheck`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCheckEntry {
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    pub name: Option<String>,
    pub context: Option<String>,
    pub conclusion: Option<String>,
    pub status: Option<String>,
    pub state: Option<String>,
}

/// A rollup entry after shape discrimination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCheck {
    /// Modern per-job check-run
    CheckRun {
        name: Option<String>,
        conclusion: Option<String>,
        status: Option<String>,
    },
    /// Legacy commit status
    StatusContext {
        context: Option<String>,
        state: Option<String>,
    },
}

impl RawCheck {
    /// Decide which shape an entry has.
    ///
    /// An explicit `__typename` of `StatusContext` wins. Without a type tag,
    /// an entry with `context` but no `name` is a status-context. Everything
    /// else is a check-run.
    pub fn classify(entry: RawCheckEntry) -> Self {
        let is_status_context = match entry.typename.as_deref() {
            Some(tag) => tag == STATUS_CONTEXT_TYPENAME,
            None => entry.name.is_none() && entry.context.is_some(),
        };

        if is_status_context {
            RawCheck::StatusContext {
                context: entry.context,
                state: entry.state,
            }
        } else {
            RawCheck::CheckRun {
                name: entry.name,
                conclusion: entry.conclusion,
                status: entry.status,
            }
        }
    }

    /// Map to the canonical vocabulary
    pub fn into_check(self) -> CiCheck {
        match self {
            RawCheck::CheckRun {
                name,
                conclusion,
                status,
            } => CiCheck {
                name: name_or_unknown(name),
                // gh reports in-flight runs with an empty conclusion
                conclusion: conclusion
                    .filter(|c| !c.is_empty())
                    .map(Conclusion::from),
                status: status.unwrap_or_default(),
            },
            RawCheck::StatusContext { context, state } => {
                let state = state.unwrap_or_default().to_uppercase();
                let conclusion = match state.as_str() {
                    "SUCCESS" => Some(Conclusion::Success),
                    "ERROR" | "FAILURE" => Some(Conclusion::Failure),
                    _ => None,
                };
                CiCheck {
                    name: name_or_unknown(context),
                    conclusion,
                    status: state,
                }
            }
        }
    }
}

impl From<RawCheckEntry> for RawCheck {
    fn from(entry: RawCheckEntry) -> Self {
        RawCheck::classify(entry)
    }
}

fn name_or_unknown(name: Option<String>) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNKNOWN_CHECK_NAME.to_string())
}

/// A canonical CI signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiCheck {
    pub name: String,
    /// `None` while the check has not concluded
    pub conclusion: Option<Conclusion>,
    /// Provider status string, kept for display only
    #[serde(default)]
    pub status: String,
}

impl CiCheck {
    pub fn new(name: impl Into<String>, conclusion: Option<Conclusion>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conclusion,
            status: status.into(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.conclusion.is_none() && self.status == "IN_PROGRESS"
    }
}

/// Normalize a raw rollup into one canonical check per name.
///
/// Later entries replace earlier ones with the same name. A replaced entry
/// keeps the slot of the first occurrence, so output order is the order in
/// which names were first reported.
pub fn normalize_checks<I>(entries: I) -> Vec<CiCheck>
where
    I: IntoIterator<Item = RawCheckEntry>,
{
    let mut checks: Vec<CiCheck> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let check = RawCheck::classify(entry).into_check();
        match slots.get(&check.name) {
            Some(&idx) => checks[idx] = check,
            None => {
                slots.insert(check.name.clone(), checks.len());
                checks.push(check);
            }
        }
    }

    checks
}
