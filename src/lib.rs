//! # authorguard - committer identity checks for git hooks
//!
//! authorguard validates the committer's `user.name` and `user.email` from
//! git configuration against patterns configured per hook, and aborts the
//! commit when they do not match.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter authorguard.toml and edit the patterns
//! authorguard config init
//!
//! # Install the pre-commit / commit-msg hook scripts
//! authorguard install
//!
//! # Try the configured patterns without committing
//! authorguard check
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use authorguard::git::GitRepo;
//! use authorguard::hooks::{AuthorValidator, ValidationOptions};
//!
//! let options = ValidationOptions::new(Some("/^[A-Z]/"), Some(r"/@example\.com$/i"))?;
//! let repo = GitRepo::discover()?;
//! AuthorValidator::new().execute(&options, &repo)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;

pub use cli::{Cli, Output};
pub use config::AuthorGuardConfig;

/// Result type alias for authorguard operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
