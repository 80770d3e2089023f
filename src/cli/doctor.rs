//! Doctor command - check environment

use anyhow::{bail, Result};
use pr_ready::config::UserConfig;
use pr_ready::github::{run_gh, GhError};
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub fn run(config: &UserConfig) -> Result<()> {
    println!("🩺 pr-ready Doctor\n");
    let mut failed = 0;

    // gh on PATH
    match run_gh(&["--version".to_string()], PROBE_TIMEOUT) {
        Ok(out) => {
            let version = out.lines().next().unwrap_or("").trim();
            println!("✓ GitHub CLI: {}", version);
        }
        Err(GhError::NotInstalled) => {
            failed += 1;
            println!("✗ GitHub CLI: not installed");
            println!("  Install from https://cli.github.com");
        }
        Err(e) => {
            failed += 1;
            println!("✗ GitHub CLI: {}", e);
        }
    }

    // gh logged in (only meaningful once gh exists)
    if failed == 0 {
        match run_gh(&["auth".to_string(), "status".to_string()], PROBE_TIMEOUT) {
            Ok(_) => println!("✓ GitHub auth: logged in"),
            Err(e) => {
                failed += 1;
                println!("✗ GitHub auth: {}", e);
                println!("  Run `gh auth login`");
            }
        }
    }

    if config.repos.is_empty() {
        failed += 1;
        println!("✗ Repositories: none configured");
        println!("  Run `pr-ready config init`, or set PR_READY_REPOS=owner/repo");
    } else {
        println!("✓ Repositories: {} configured", config.repos.len());
    }

    if failed > 0 {
        bail!("{} check(s) failed", failed);
    }
    println!("\n✅ All checks passed!");
    Ok(())
}
