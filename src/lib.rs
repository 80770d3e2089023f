//! pr-ready - PR readiness dashboard
//!
//! Scores open pull requests across several GitHub repositories by how
//! close they are to mergeable: CI health, review decision, merge
//! conflicts and freshness. Data comes from the locally authenticated
//! `gh` CLI.
//!
//! The scoring core ([`checks`], [`scoring`]) is pure: no I/O, and "now"
//! is always passed in.

pub mod checks;
pub mod config;
pub mod github;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scoring;
