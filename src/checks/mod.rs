//! CI check normalization
//!
//! Pull request status rollups mix two record shapes:
//!
//! - **Check-runs**: `{ name, conclusion, status }`, already upper-case tokens
//! - **Status-contexts**: `{ context, state }`, the legacy commit-status API
//!
//! Both are folded into a single [`CiCheck`] list with one entry per check
//! name. When a name is reported more than once, the entry seen last wins.
//!
//! ```text
//! raw JSON ──► RawCheckEntry ──► RawCheck::{CheckRun, StatusContext} ──► CiCheck
//!                                     (single discrimination point)
//! ```

mod conclusion;
mod normalize;

pub use conclusion::Conclusion;
pub use normalize::{normalize_checks, CiCheck, RawCheck, RawCheckEntry, STATUS_CONTEXT_TYPENAME};
