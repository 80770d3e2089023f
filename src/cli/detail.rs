//! Detail command - one PR with checks and review discussion

use anyhow::Result;
use chrono::Utc;
use pr_ready::github::PrSource;
use pr_ready::models::RepoConfig;
use pr_ready::pipeline::Pipeline;
use pr_ready::reporters::{render_detail, OutputFormat};

pub fn run(
    source: &dyn PrSource,
    repos: &[RepoConfig],
    number: u64,
    format: OutputFormat,
) -> Result<()> {
    let report = Pipeline::new(source).detail(repos, number, Utc::now())?;

    println!("{}", render_detail(&report, format)?.trim_end());
    Ok(())
}
