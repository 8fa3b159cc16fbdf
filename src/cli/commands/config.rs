use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::Path;

use crate::cli::Output;
use crate::config::{ConfigFormat, REPO_CONFIG_BASE};
use crate::hooks::HookExecutor;

/// Starter file written by `config init`
const CONFIG_TEMPLATE: &str = r#"# authorguard configuration
#
# Patterns are delimited regex literals: /body/modifiers (modifiers: i m s x U u).
# They match anywhere in the value unless anchored with ^ and $.

[hooks.pre-commit]
enabled = true
actions = [
    { action = "validate_author", options = { name = "/^\\S+( \\S+)+$/", email = "/^[^@\\s]+@[^@\\s]+$/" } },
]

[hooks.commit-msg]
enabled = false
"#;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Create a starter authorguard.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Display current merged configuration
    Show {
        /// Output format: json, toml, yaml
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Get a configuration value by dotted key
    Get { key: String },
    /// Check that every configured action and pattern compiles
    Validate,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    match args.command {
        ConfigCommand::Init { force } => init(force, output),
        ConfigCommand::Show { format } => {
            let format = ConfigFormat::from_name(&format)?;
            let config = super::load_config(custom_config)?;
            println!("{}", config.export_config(format)?);
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let config = super::load_config(custom_config)?;
            let value = config
                .get_section(&key)
                .with_context(|| format!("Configuration key not found: {key}"))?;
            match value {
                serde_json::Value::String(s) => println!("{s}"),
                other => println!("{}", serde_json::to_string_pretty(&other)?),
            }
            Ok(())
        }
        ConfigCommand::Validate => {
            let config = super::load_config(custom_config)?;
            let executor = HookExecutor::new(config.hooks()?);
            let count = executor.validate()?;
            output.success(&format!("Configuration is valid ({count} action(s))"));
            Ok(())
        }
    }
}

fn init(force: bool, output: &Output) -> Result<()> {
    let path = format!("{REPO_CONFIG_BASE}.toml");
    if Path::new(&path).exists() && !force {
        anyhow::bail!("{path} already exists (use --force to overwrite)");
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {path}"))?;
    output.success(&format!("Created {path}"));
    output.info("Edit the patterns, then run 'authorguard install'");
    Ok(())
}
