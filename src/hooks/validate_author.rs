//! Author validation hook action
//!
//! Checks the committer identity from git configuration (`user.name` and
//! `user.email`) against patterns configured on the action. Each field is
//! opt-in: a field without a pattern is never looked up.
//!
//! ```toml
//! [[hooks.pre-commit.actions]]
//! action = "validate_author"
//! options = { name = "/^[A-Z][a-z]+ [A-Z][a-z]+$/", email = "/@example\\.com$/i" }
//! ```

use super::pattern::{PatternError, RegexLiteral};
use crate::git::ConfigSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Builtin action name used in hook configuration
pub const ACTION_NAME: &str = "validate_author";

/// Raw options as they appear in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The identity fields that can be validated, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorField {
    Name,
    Email,
}

impl AuthorField {
    pub const ALL: [AuthorField; 2] = [AuthorField::Name, AuthorField::Email];

    /// Git configuration key holding the value
    pub fn config_key(self) -> &'static str {
        match self {
            AuthorField::Name => "user.name",
            AuthorField::Email => "user.email",
        }
    }

    /// Option key in hook configuration
    pub fn option_key(self) -> &'static str {
        match self {
            AuthorField::Name => "name",
            AuthorField::Email => "email",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthorField::Name => "author name",
            AuthorField::Email => "author email",
        }
    }
}

impl fmt::Display for AuthorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A configured pattern could not be compiled
#[derive(Debug, Error)]
#[error("invalid `{option}` pattern in validate_author configuration")]
pub struct ConfigurationError {
    pub option: &'static str,
    #[source]
    pub source: PatternError,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    /// The configured value does not satisfy the pattern
    #[error("{field} '{value}' does not match pattern {pattern}")]
    Mismatch {
        field: AuthorField,
        value: String,
        pattern: String,
    },

    /// The config source itself failed, which is different from a key being unset
    #[error("failed to read git config '{key}'")]
    Lookup {
        key: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Compiled author patterns. Built once per invocation.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    name: Option<RegexLiteral>,
    email: Option<RegexLiteral>,
}

impl ValidationOptions {
    /// Compile both patterns up front so a bad pattern fails before git is queried
    pub fn new(name: Option<&str>, email: Option<&str>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            name: compile(AuthorField::Name, name)?,
            email: compile(AuthorField::Email, email)?,
        })
    }

    pub fn from_options(options: &AuthorOptions) -> Result<Self, ConfigurationError> {
        Self::new(options.name.as_deref(), options.email.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    pub fn pattern(&self, field: AuthorField) -> Option<&RegexLiteral> {
        match field {
            AuthorField::Name => self.name.as_ref(),
            AuthorField::Email => self.email.as_ref(),
        }
    }
}

fn compile(
    field: AuthorField,
    literal: Option<&str>,
) -> Result<Option<RegexLiteral>, ConfigurationError> {
    literal
        .map(|literal| {
            RegexLiteral::parse(literal).map_err(|source| ConfigurationError {
                option: field.option_key(),
                source,
            })
        })
        .transpose()
}

/// Validates the committer identity against [`ValidationOptions`]
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorValidator;

impl AuthorValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks name before email and stops at the first failure.
    pub fn execute<C>(&self, options: &ValidationOptions, config: &C) -> Result<(), ValidationError>
    where
        C: ConfigSource + ?Sized,
    {
        if options.is_empty() {
            tracing::debug!("no author patterns configured, skipping validation");
            return Ok(());
        }

        for field in AuthorField::ALL {
            if let Some(pattern) = options.pattern(field) {
                check_field(field, pattern, config)?;
            }
        }

        Ok(())
    }
}

fn check_field<C>(field: AuthorField, pattern: &RegexLiteral, config: &C) -> Result<(), ValidationError>
where
    C: ConfigSource + ?Sized,
{
    let key = field.config_key();
    let value = config
        .get(key)
        .map_err(|source| ValidationError::Lookup {
            key,
            source: source.into(),
        })?;

    tracing::debug!("checking {} '{}' against {}", field, value, pattern);

    if pattern.is_match(&value) {
        Ok(())
    } else {
        Err(ValidationError::Mismatch {
            field,
            value,
            pattern: pattern.to_string(),
        })
    }
}
