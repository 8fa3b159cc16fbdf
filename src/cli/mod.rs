//! Command-line interface for authorguard
//!
//! Git calls `authorguard run <hook>` from the scripts `authorguard install`
//! writes; the remaining commands exist for setting things up and checking
//! them by hand.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

use commands::{check, config, install, run, status, uninstall, version};

/// authorguard - keep commits tied to the right identity
#[derive(Parser)]
#[command(
    name = "authorguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Git hook that validates the committer's name and email",
    long_about = "authorguard checks git's user.name and user.email against patterns \
                  configured per hook and aborts the commit when they do not match."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true, env = "AUTHORGUARD_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the actions configured for a hook (called by the installed hook scripts)
    Run(run::RunArgs),
    /// Validate the current author identity right now
    Check(check::CheckArgs),
    /// Install hook scripts into the current repository
    Install(install::InstallArgs),
    /// Remove hook scripts installed by authorguard
    Uninstall(uninstall::UninstallArgs),
    /// Show installation, identity and configuration status
    Status,
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let custom_config = self.config.as_deref();

        match self.command {
            Some(Commands::Run(args)) => run::execute(args, custom_config, &output),
            Some(Commands::Check(args)) => check::execute(args, custom_config, &output),
            Some(Commands::Install(args)) => install::execute(args, custom_config, &output),
            Some(Commands::Uninstall(args)) => uninstall::execute(args, custom_config, &output),
            Some(Commands::Status) => status::execute(custom_config, &output),
            Some(Commands::Config(args)) => config::execute(args, custom_config, &output),
            Some(Commands::Version) => version::execute(&output),
            None => {
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // try_init: a subscriber may already be set when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
