use anyhow::{Context, Result, anyhow};

use super::config::{ActionDefinition, HookConfig};
use super::validate_author::{self, AuthorOptions, AuthorValidator, ValidationOptions};
use crate::cli::Output;
use crate::git::ConfigSource;

/// A builtin action resolved from configuration, ready to run
#[derive(Debug)]
pub enum PreparedAction {
    ValidateAuthor(ValidationOptions),
}

impl PreparedAction {
    /// Resolve and compile an action definition without touching git
    pub fn prepare(definition: &ActionDefinition) -> Result<Self> {
        match definition.action.as_str() {
            validate_author::ACTION_NAME => {
                let options: AuthorOptions =
                    serde_json::from_value(serde_json::Value::Object(definition.options.clone()))
                        .with_context(|| {
                            format!("Failed to parse options for '{}'", definition.action)
                        })?;
                let options = ValidationOptions::from_options(&options)?;
                Ok(PreparedAction::ValidateAuthor(options))
            }
            unknown => Err(anyhow!("Unknown builtin action: {unknown}")),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PreparedAction::ValidateAuthor(_) => validate_author::ACTION_NAME,
        }
    }

    pub fn run<C>(&self, source: &C) -> Result<()>
    where
        C: ConfigSource + ?Sized,
    {
        match self {
            PreparedAction::ValidateAuthor(options) => {
                AuthorValidator::new().execute(options, source)?;
                Ok(())
            }
        }
    }
}

pub struct HookExecutor {
    hook_config: HookConfig,
}

impl HookExecutor {
    pub fn new(hook_config: HookConfig) -> Self {
        Self { hook_config }
    }

    /// Compile every action of every hook, reporting the first bad one
    pub fn validate(&self) -> Result<usize> {
        let mut count = 0;
        for (hook_name, hook_def) in &self.hook_config.hooks {
            for definition in &hook_def.actions {
                PreparedAction::prepare(definition)
                    .with_context(|| format!("Invalid action in '{hook_name}' hook"))?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn execute<C>(
        &self,
        hook_name: &str,
        args: &[String],
        source: &C,
        output: &Output,
    ) -> Result<()>
    where
        C: ConfigSource + ?Sized,
    {
        let hook_def = self
            .hook_config
            .get(hook_name)
            .ok_or_else(|| anyhow!("Unknown hook: {}", hook_name))?;

        if !hook_def.enabled {
            output.info(&format!("Hook '{hook_name}' is disabled"));
            return Ok(());
        }

        tracing::debug!("running {} hook with args {:?}", hook_name, args);

        // All actions compile before any of them runs
        let actions = hook_def
            .actions
            .iter()
            .map(PreparedAction::prepare)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid configuration for '{hook_name}' hook"))?;

        if actions.is_empty() {
            output.verbose(&format!("No actions configured for {hook_name}"));
            return Ok(());
        }

        for action in &actions {
            output.step(&format!("{hook_name}: {}", action.name()));
            action
                .run(source)
                .with_context(|| format!("{} failed in {} hook", action.name(), hook_name))?;
        }

        output.success(&format!("{hook_name} passed"));
        Ok(())
    }
}
