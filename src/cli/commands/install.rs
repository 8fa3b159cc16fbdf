use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::git::{GitRepo, hook_script};
use crate::hooks::DEFAULT_HOOKS;

#[derive(Args)]
pub struct InstallArgs {
    /// Specify which hooks to install (default: every enabled hook in the configuration)
    #[arg(long, value_delimiter = ',')]
    pub hooks: Option<Vec<String>>,

    /// Overwrite existing hooks not installed by authorguard
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: InstallArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;

    let hooks = match args.hooks {
        Some(hooks) => hooks,
        None => {
            let config = super::load_config(custom_config)?;
            let hook_config = config.hooks()?;
            let enabled = hook_config.enabled_hooks();
            if enabled.is_empty() {
                DEFAULT_HOOKS.iter().map(|h| h.to_string()).collect()
            } else {
                enabled.into_iter().map(str::to_string).collect()
            }
        }
    };

    output.info("Installing authorguard hooks...");
    if args.force {
        output.warning("Force mode enabled - will overwrite existing hooks");
    }

    for hook in &hooks {
        let path = repo.install_hook(hook, &hook_script(hook), args.force)?;
        output.success(&format!("Installed {hook} ({})", path.display()));
    }

    Ok(())
}
