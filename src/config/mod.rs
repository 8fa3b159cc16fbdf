//! Layered configuration
//!
//! Embedded defaults, user config, repository config (or an explicit
//! `--config` file) and `AUTHORGUARD_*` environment variables, merged with
//! figment in that order.

pub mod core;
pub mod formats;

pub use self::core::{AuthorGuardConfig, REPO_CONFIG_BASE};
pub use self::formats::ConfigFormat;
