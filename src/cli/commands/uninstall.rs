use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::git::GitRepo;
use crate::hooks::DEFAULT_HOOKS;

#[derive(Args)]
pub struct UninstallArgs {
    /// Specify which hooks to remove (default: the standard hooks and every configured hook)
    #[arg(long, value_delimiter = ',')]
    pub hooks: Option<Vec<String>>,
}

pub fn execute(args: UninstallArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let repo = GitRepo::discover()?;

    let hooks = match args.hooks {
        Some(hooks) => hooks,
        None => {
            let mut hooks: Vec<String> = DEFAULT_HOOKS.iter().map(|h| h.to_string()).collect();
            // A broken config must not stop people from removing the hooks
            if let Ok(config) = super::load_config(custom_config) {
                if let Ok(hook_config) = config.hooks() {
                    hooks.extend(hook_config.hooks.into_keys());
                }
            }
            hooks.sort();
            hooks.dedup();
            hooks
        }
    };

    output.info("Removing authorguard hooks...");

    let mut removed = 0;
    for hook in &hooks {
        if repo.remove_hook(hook)? {
            removed += 1;
            output.success(&format!("Removed {hook}"));
        } else if repo.hook_exists(hook)? {
            output.warning(&format!("Left {hook} alone, it was not installed by authorguard"));
        }
    }

    if removed == 0 {
        output.info("No authorguard hooks were installed");
    }

    Ok(())
}
