use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::path::Path;

use super::formats::SmartProvider;
use crate::hooks::HookConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Extensions tried for the user and repository config files, in merge order
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "json", "yaml", "yml"];

/// Repository config file name without extension
pub const REPO_CONFIG_BASE: &str = "authorguard";

pub struct AuthorGuardConfig {
    figment: Figment,
}

impl AuthorGuardConfig {
    /// Defaults, then user and repository files (or `custom_config` alone), then environment.
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).exists() {
                anyhow::bail!("Config file not found: {}", custom_path);
            }
            tracing::debug!("using custom config {}", custom_path);
            figment = figment.merge(SmartProvider::file(custom_path));
        } else {
            let user_base = Self::user_config_base_path();
            for ext in CONFIG_EXTENSIONS {
                figment = figment.merge(SmartProvider::file(format!("{user_base}.{ext}")));
            }
            for ext in CONFIG_EXTENSIONS {
                figment = figment.merge(SmartProvider::file(format!("{REPO_CONFIG_BASE}.{ext}")));
            }
        }

        // Environment variables always have highest priority.
        // AUTHORGUARD_CONFIG names the config file and is not a setting.
        figment = figment.merge(
            Env::prefixed("AUTHORGUARD_")
                .ignore(&["config"])
                .split("__"),
        );

        // Surface syntax errors now rather than at first use
        let merged: serde_json::Value = figment
            .extract()
            .context("Failed to load configuration")?;
        tracing::trace!("CONFIG LOAD: Final config = {}", merged);

        Ok(AuthorGuardConfig { figment })
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        let value = self.figment.extract_inner(path)?;
        Ok(value)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        let value = self.figment.extract()?;
        Ok(value)
    }

    /// Hook definitions; an absent `hooks` table means no hooks
    pub fn hooks(&self) -> Result<HookConfig> {
        if !self.figment.contains("hooks") {
            return Ok(HookConfig::default());
        }

        self.figment
            .extract_inner("hooks")
            .context("Failed to parse hooks configuration")
    }

    /// Files that exist and took part in the merge
    pub fn sources(&self) -> Vec<String> {
        self.figment
            .metadata()
            .filter_map(|metadata| metadata.source.as_ref())
            .filter_map(|source| source.file_path())
            .filter(|path| path.exists())
            .map(|path| path.display().to_string())
            .collect()
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/authorguard/config"),
            Err(_) => "~/.config/authorguard/config".to_string(),
        }
    }
}
