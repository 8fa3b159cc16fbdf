use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::git::GitRepo;
use crate::hooks::HookExecutor;

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Hook name to run, e.g. pre-commit
    pub hook: String,

    /// Arguments git passed to the hook
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn execute(args: RunArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let config = super::load_config(custom_config)?;
    let executor = HookExecutor::new(config.hooks()?);
    let repo = GitRepo::discover()?;

    executor.execute(&args.hook, &args.args, &repo, output)
}
