//! User-level configuration for pr-ready
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/pr-ready/config.toml (or an explicit `--config` path)

use crate::models::RepoConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Overrides the config file location
pub const CONFIG_ENV: &str = "PR_READY_CONFIG";

/// Comma-separated `owner/repo` list that replaces the configured repos
pub const REPOS_ENV: &str = "PR_READY_REPOS";

const DEFAULT_LIMIT: usize = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    /// Repositories to watch
    #[serde(default)]
    pub repos: Vec<RepoConfig>,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// Max PRs per repository (`gh pr list --limit`)
    pub limit: Option<usize>,

    /// Seconds before a `gh` call is killed
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Hide dependency-bot PRs from the list (default: true)
    pub hide_bots: Option<bool>,
}

impl UserConfig {
    /// Load config, with priority:
    /// 1. Environment variables (highest)
    /// 2. Config file (`path`, or the user config path)
    ///
    /// A broken config file is logged and ignored rather than fatal.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = UserConfig::default();

        let file = path.map(Path::to_path_buf).or_else(Self::user_config_path);
        if let Some(file) = file.filter(|p| p.exists()) {
            match Self::read_file(&file) {
                Ok(from_file) => {
                    debug!("Loaded config from {}", file.display());
                    config.merge(from_file);
                }
                Err(e) => warn!("Ignoring config {}: {:#}", file.display(), e),
            }
        }

        if let Ok(list) = std::env::var(REPOS_ENV) {
            config.repos = parse_repo_list(&list);
        }

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;
        Ok(config)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pr-ready").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if !other.repos.is_empty() {
            self.repos = other.repos;
        }
        if other.fetch.limit.is_some() {
            self.fetch.limit = other.fetch.limit;
        }
        if other.fetch.timeout_secs.is_some() {
            self.fetch.timeout_secs = other.fetch.timeout_secs;
        }
        if other.display.hide_bots.is_some() {
            self.display.hide_bots = other.display.hide_bots;
        }
    }

    pub fn limit(&self) -> usize {
        self.fetch.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn hide_bots(&self) -> bool {
        self.display.hide_bots.unwrap_or(true)
    }

    /// Create the config file with commented examples if it doesn't exist
    pub fn init_user_config(path: Option<&Path>) -> Result<PathBuf> {
        let config_path = path
            .map(Path::to_path_buf)
            .or_else(Self::user_config_path)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# pr-ready configuration

# Repositories to watch. Override with PR_READY_REPOS="owner/repo,owner/other".
# [[repos]]
# owner = "acme"
# repo = "widgets"

[fetch]
# limit = 50          # max open PRs per repository
# timeout_secs = 60   # per gh call

[display]
# hide_bots = true    # hide dependabot/renovate/snyk PRs
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}

/// Parse `owner/repo,owner/other`. Invalid entries are skipped with a warning.
pub fn parse_repo_list(list: &str) -> Vec<RepoConfig> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<RepoConfig>() {
            Ok(repo) => Some(repo),
            Err(e) => {
                warn!("{}: {}", REPOS_ENV, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(config.repos.is_empty());
        assert_eq!(config.limit(), 50);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.hide_bots());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
[[repos]]
owner = "acme"
repo = "widgets"

[[repos]]
owner = "acme"
repo = "gadgets"

[fetch]
limit = 20
timeout_secs = 5

[display]
hide_bots = false
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.repos,
            vec![
                RepoConfig::new("acme", "widgets"),
                RepoConfig::new("acme", "gadgets")
            ]
        );
        assert_eq!(config.limit(), 20);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(!config.hide_bots());
    }

    #[test]
    fn test_toml_parsing_minimal() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.repos.is_empty());
        assert_eq!(config.limit(), 50);
    }

    #[test]
    fn test_zero_limit_falls_back_to_default() {
        let config: UserConfig = toml::from_str("[fetch]\nlimit = 0\n").unwrap();
        assert_eq!(config.limit(), 50);
    }

    #[test]
    fn test_invalid_toml_does_not_crash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [[ not valid toml {{{}}}").unwrap();
        assert!(UserConfig::read_file(&path).is_err());
        // load() swallows the error and falls back to defaults
        let config = UserConfig::load(Some(&path)).unwrap();
        assert_eq!(config.limit(), 50);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 7\n").unwrap();
        let config = UserConfig::load(Some(&path)).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_merge_overrides_set_fields() {
        let mut base = UserConfig::default();
        let other = UserConfig {
            repos: vec![RepoConfig::new("acme", "widgets")],
            fetch: FetchConfig {
                limit: Some(10),
                timeout_secs: Some(3),
            },
            display: DisplayConfig {
                hide_bots: Some(false),
            },
        };
        base.merge(other);
        assert_eq!(base.repos.len(), 1);
        assert_eq!(base.limit(), 10);
        assert_eq!(base.timeout(), Duration::from_secs(3));
        assert!(!base.hide_bots());
    }

    #[test]
    fn test_merge_preserves_base_when_other_is_empty() {
        let mut base = UserConfig {
            repos: vec![RepoConfig::new("acme", "widgets")],
            fetch: FetchConfig {
                limit: Some(10),
                timeout_secs: None,
            },
            display: DisplayConfig::default(),
        };
        base.merge(UserConfig::default());
        assert_eq!(base.repos, vec![RepoConfig::new("acme", "widgets")]);
        assert_eq!(base.limit(), 10);
    }

    #[test]
    fn test_parse_repo_list() {
        let repos = parse_repo_list(" acme/widgets, ,acme/gadgets,broken ");
        assert_eq!(
            repos,
            vec![
                RepoConfig::new("acme", "widgets"),
                RepoConfig::new("acme", "gadgets")
            ]
        );
        assert!(parse_repo_list("").is_empty());
    }

    #[test]
    fn test_init_writes_example_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let written = UserConfig::init_user_config(Some(&path)).unwrap();
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[fetch]"));
        // The example parses to defaults
        let config: UserConfig = toml::from_str(&content).unwrap();
        assert!(config.repos.is_empty());

        std::fs::write(&path, "[fetch]\nlimit = 3\n").unwrap();
        UserConfig::init_user_config(Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[fetch]\nlimit = 3\n");
    }

    #[test]
    fn test_user_config_path_shape() {
        if let Some(p) = UserConfig::user_config_path() {
            assert!(p.ends_with("pr-ready/config.toml"));
        }
    }
}
