//! Git hooks management module
//!
//! Hooks are configured as an ordered list of builtin actions. Every action
//! is compiled before the first one runs, so a broken pattern is reported as
//! a configuration problem instead of a failed check.
//!
//! ## Built-in Actions
//!
//! - `validate_author` - Validates `user.name` / `user.email` against patterns
//!
//! ```toml
//! [hooks.pre-commit]
//! enabled = true
//! actions = [
//!   { action = "validate_author", options = { email = "/@example\\.com$/" } },
//! ]
//! ```

mod config;
mod executor;
pub mod pattern;
pub mod validate_author;

pub use config::{ActionDefinition, HookConfig, HookDefinition};
pub use executor::{HookExecutor, PreparedAction};
pub use pattern::{PatternError, RegexLiteral};
pub use validate_author::{
    AuthorField, AuthorOptions, AuthorValidator, ConfigurationError, ValidationError,
    ValidationOptions,
};

/// Hooks `install` writes when the configuration names none
pub const DEFAULT_HOOKS: [&str; 2] = ["pre-commit", "commit-msg"];
