use anyhow::{Context, Result};
use clap::Args;
use std::cell::RefCell;

use crate::cli::Output;
use crate::git::{ConfigSource, GitRepo};
use crate::hooks::validate_author::ACTION_NAME;
use crate::hooks::{AuthorField, AuthorOptions, AuthorValidator, HookConfig, ValidationOptions};

#[derive(Args, Default)]
pub struct CheckArgs {
    /// Pattern for user.name, e.g. '/^[A-Z][a-z]+ [A-Z][a-z]+$/'
    #[arg(long)]
    pub name: Option<String>,

    /// Pattern for user.email, e.g. '/@example\.com$/i'
    #[arg(long)]
    pub email: Option<String>,

    /// Hook whose validate_author options fill in patterns not given as flags
    #[arg(long, default_value = "pre-commit")]
    pub hook: String,
}

pub fn execute(args: CheckArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let config = super::load_config(custom_config)?;
    let configured = configured_options(&config.hooks()?, &args.hook)?;

    let merged = AuthorOptions {
        name: args.name.or(configured.name),
        email: args.email.or(configured.email),
    };
    let options = ValidationOptions::from_options(&merged)?;

    if options.is_empty() {
        output.info("No author patterns configured, nothing to check");
        return Ok(());
    }

    let repo = GitRepo::discover()?;
    for (field, value) in validate_identity(&options, &repo)? {
        if let Some(pattern) = options.pattern(field) {
            output.key_value(&format!("{field}:"), &format!("{value} ~ {pattern}"), true);
        }
    }
    output.success("Author identity matches the configured patterns");
    Ok(())
}

/// Runs the validator and returns the values it read
fn validate_identity<C>(options: &ValidationOptions, source: &C) -> Result<Vec<(AuthorField, String)>>
where
    C: ConfigSource + ?Sized,
{
    let recorder = RecordingSource {
        inner: source,
        seen: RefCell::new(Vec::new()),
    };
    AuthorValidator::new().execute(options, &recorder)?;

    let seen = recorder.seen.into_inner();
    Ok(AuthorField::ALL
        .into_iter()
        .filter_map(|field| {
            seen.iter()
                .find(|(key, _)| *key == field.config_key())
                .map(|(_, value)| (field, value.clone()))
        })
        .collect())
}

struct RecordingSource<'a, C: ?Sized> {
    inner: &'a C,
    seen: RefCell<Vec<(String, String)>>,
}

impl<C: ConfigSource + ?Sized> ConfigSource for RecordingSource<'_, C> {
    fn get(&self, key: &str) -> Result<String> {
        let value = self.inner.get(key)?;
        self.seen.borrow_mut().push((key.to_string(), value.clone()));
        Ok(value)
    }
}

/// Options of the first `validate_author` action in `hook_name`, if any
pub(crate) fn configured_options(hooks: &HookConfig, hook_name: &str) -> Result<AuthorOptions> {
    let Some(action) = hooks.find_action(hook_name, ACTION_NAME) else {
        return Ok(AuthorOptions::default());
    };

    serde_json::from_value(serde_json::Value::Object(action.options.clone()))
        .with_context(|| format!("Failed to parse {ACTION_NAME} options in '{hook_name}' hook"))
}
