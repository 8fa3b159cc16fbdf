pub mod check;
pub mod config;
pub mod install;
pub mod run;
pub mod status;
pub mod uninstall;
pub mod version;

use anyhow::Result;

use crate::config::AuthorGuardConfig;

/// Load configuration and apply its presentation settings
pub(crate) fn load_config(custom_config: Option<&str>) -> Result<AuthorGuardConfig> {
    let config = AuthorGuardConfig::load(custom_config)?;

    if let Ok(serde_json::Value::Bool(color)) = config.get_section("general.color") {
        console::set_colors_enabled(color);
        console::set_colors_enabled_stderr(color);
    }

    Ok(config)
}
