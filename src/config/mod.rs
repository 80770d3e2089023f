//! Configuration module for pr-ready
//!
//! This module handles:
//! - The watched repository list
//! - `gh` fetch limits and timeouts
//! - Display defaults (bot filtering)

mod user_config;

pub use user_config::{
    parse_repo_list, DisplayConfig, FetchConfig, UserConfig, CONFIG_ENV, REPOS_ENV,
};
