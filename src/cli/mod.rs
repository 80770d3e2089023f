//! CLI command definitions and handlers

mod detail;
mod doctor;
mod list;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use pr_ready::config::{UserConfig, REPOS_ENV};
use pr_ready::github::GhCli;
use pr_ready::models::RepoConfig;
use pr_ready::reporters::OutputFormat;
use pr_ready::scoring::SortKey;
use std::path::{Path, PathBuf};

/// Parse and validate an `owner/repo` argument
fn parse_repo(s: &str) -> Result<RepoConfig, String> {
    s.parse()
}

/// pr-ready - PR readiness checker
#[derive(Parser, Debug)]
#[command(name = "pr-ready")]
#[command(
    version,
    about = "Score open pull requests by how ready they are to merge",
    long_about = "pr-ready lists open pull requests across your repositories with a \
0-100 readiness score built from CI results, review decision, merge conflicts and \
freshness.\n\n\
Data comes from the GitHub CLI (`gh`), which must be installed and authenticated.",
    after_help = "\
Examples:
  pr-ready                         List all open PRs with scores
  pr-ready 289                     Check a specific PR (auto-detects repo)
  pr-ready 289 --repo acme/widgets Check a PR in a specific repo
  pr-ready --json                  JSON output for scripts and agents
  pr-ready --sort updated          Most recently updated first
  pr-ready config init             Write an example config file
  pr-ready doctor                  Check gh and config"
)]
pub struct Cli {
    /// PR number to inspect (omit to list all open PRs)
    pub pr_number: Option<u64>,

    /// Target repository (owner/repo)
    #[arg(long, value_parser = parse_repo)]
    pub repo: Option<RepoConfig>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List order: score, updated, created
    #[arg(long, default_value = "score", value_parser = ["score", "updated", "created"])]
    pub sort: String,

    /// Include dependency-bot PRs (dependabot, renovate, snyk)
    #[arg(long)]
    pub show_bots: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: <config dir>/pr-ready/config.toml)
    #[arg(long, global = true, env = "PR_READY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check that gh is installed and authenticated and repos are configured
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize config file with example settings
    Init,
    /// Show current config and paths
    Show,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = UserConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Config { action }) => {
            run_config_action(action, cli.config.as_deref(), &config)
        }
        Some(Commands::Doctor) => doctor::run(&config),
        None => {
            let format = if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            let repos = match cli.repo {
                Some(repo) => vec![repo],
                None => config.repos.clone(),
            };
            if repos.is_empty() {
                bail!(
                    "No repositories configured. Run `pr-ready config init` and add [[repos]], or set {}=owner/repo",
                    REPOS_ENV
                );
            }

            let source = GhCli::new(config.limit(), config.timeout());
            match cli.pr_number {
                Some(number) => detail::run(&source, &repos, number, format),
                None => {
                    let sort: SortKey = cli.sort.parse()?;
                    let hide_bots = config.hide_bots() && !cli.show_bots;
                    list::run(&source, &repos, sort, hide_bots, format)
                }
            }
        }
    }
}

fn run_config_action(
    action: ConfigAction,
    explicit_path: Option<&Path>,
    config: &UserConfig,
) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = UserConfig::init_user_config(explicit_path)?;
            println!("✅ Config initialized at: {}", path.display());
            println!("\nAdd the repositories to watch:");
            println!("  {}", path.display());
            println!("\nOr set via environment:");
            println!("  export {}=\"owner/repo,owner/other\"", REPOS_ENV);
            Ok(())
        }
        ConfigAction::Show => show_config(explicit_path, config),
    }
}

fn show_config(explicit_path: Option<&Path>, config: &UserConfig) -> Result<()> {
    println!("📁 Config path:");
    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(UserConfig::user_config_path);
    match path {
        Some(path) => {
            let status = if path.exists() { "✓" } else { "(not found)" };
            println!("  {} {}", path.display(), status);
        }
        None => println!("  (no config directory)"),
    }
    if std::env::var(REPOS_ENV).is_ok() {
        println!("  {} is set and overrides [[repos]]", REPOS_ENV);
    }
    println!();

    println!("📦 Repositories ({}):", config.repos.len());
    if config.repos.is_empty() {
        println!("  none configured");
    }
    for repo in &config.repos {
        println!("  {}", repo);
    }
    println!();

    println!("⚙️  Fetch: limit {} per repo, timeout {}s", config.limit(), config.timeout().as_secs());
    println!(
        "👀 Bot PRs: {}",
        if config.hide_bots() { "hidden" } else { "shown" }
    );
    Ok(())
}
