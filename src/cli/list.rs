//! List command - score every open PR

use anyhow::Result;
use chrono::Utc;
use pr_ready::github::PrSource;
use pr_ready::models::RepoConfig;
use pr_ready::pipeline::Pipeline;
use pr_ready::reporters::{render_list, OutputFormat};
use pr_ready::scoring::SortKey;

pub fn run(
    source: &dyn PrSource,
    repos: &[RepoConfig],
    sort: SortKey,
    hide_bots: bool,
    format: OutputFormat,
) -> Result<()> {
    let report = Pipeline::new(source)
        .with_sort(sort)
        .hide_bots(hide_bots)
        .list(repos, Utc::now())?;

    println!("{}", render_list(&report, format)?.trim_end());
    Ok(())
}
