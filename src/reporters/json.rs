//! JSON reporter
//!
//! Pretty-printed JSON on stdout, field names in camelCase so the output
//! matches what `gh` consumers expect.

use anyhow::Result;
use serde::Serialize;

/// Render any report as JSON
pub fn render<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
