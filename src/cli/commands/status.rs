//! Show installation, identity and configuration status

use anyhow::Result;

use crate::cli::Output;
use crate::git::{ConfigSource, GitRepo};
use crate::hooks::{AuthorField, DEFAULT_HOOKS};

pub fn execute(custom_config: Option<&str>, output: &Output) -> Result<()> {
    output.header("authorguard status");

    let repo = match GitRepo::discover() {
        Ok(repo) => {
            output.status_indicator("REPO", &repo.git_dir().display().to_string(), true);
            repo
        }
        Err(_) => {
            output.status_indicator("REPO", "Not in a git repository", false);
            return Ok(());
        }
    };

    match repo.current_branch() {
        Ok(branch) => output.key_value("Branch:", &branch, false),
        Err(_) => output.key_value("Branch:", "(no commits yet)", false),
    }

    output.blank_line();
    output.step("Identity");
    for field in AuthorField::ALL {
        let value = repo.get(field.config_key())?;
        let shown = if value.is_empty() { "(not set)" } else { value.as_str() };
        output.key_value(&format!("{}:", field.config_key()), shown, !value.is_empty());
    }

    output.blank_line();
    output.step("Configuration");
    let config = match super::load_config(custom_config) {
        Ok(config) => config,
        Err(e) => {
            output.error(&format!("Configuration issues: {e:#}"));
            return Ok(());
        }
    };

    let sources = config.sources();
    if sources.is_empty() {
        output.key_value("Files:", "(built-in defaults only)", false);
    }
    for source in &sources {
        output.key_value("File:", source, false);
    }

    let hooks = config.hooks()?;
    let mut names: Vec<&str> = hooks.hooks.keys().map(String::as_str).collect();
    for hook in DEFAULT_HOOKS {
        if !names.contains(&hook) {
            names.push(hook);
        }
    }

    output.blank_line();
    output.step("Hooks");
    for name in names {
        let state = if repo.is_own_hook(name)? {
            "installed"
        } else if repo.hook_exists(name)? {
            "foreign hook present"
        } else {
            "not installed"
        };
        let enabled = match hooks.get(name) {
            Some(def) if def.enabled => format!("{} action(s)", def.actions.len()),
            Some(_) => "disabled".to_string(),
            None => "not configured".to_string(),
        };
        output.key_value(&format!("{name}:"), &format!("{state}, {enabled}"), state == "installed");

        let author = super::check::configured_options(&hooks, name)?;
        if let Some(pattern) = &author.name {
            output.list_item(&format!("name  {pattern}"));
        }
        if let Some(pattern) = &author.email {
            output.list_item(&format!("email {pattern}"));
        }
    }

    Ok(())
}
