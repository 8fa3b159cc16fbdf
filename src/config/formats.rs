use anyhow::Result;
use figment::providers::{Format, Json, Toml, Yaml};
use std::path::Path;

use super::core::AuthorGuardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "toml" => Ok(ConfigFormat::Toml),
            _ => anyhow::bail!("Unsupported format: {}. Use json, toml, or yaml", name),
        }
    }

    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        Self::from_name(extension).ok()
    }

    /// Guess the format of a file with an unknown extension from its content
    pub fn detect(content: &str) -> Option<Self> {
        let trimmed = content.trim();

        if (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.contains('\n'))
        {
            return Some(ConfigFormat::Json);
        }

        // TOML section headers or `key = value`
        if trimmed.lines().any(|line| {
            let line = line.trim();
            (line.starts_with('[') && line.ends_with(']'))
                || (line.contains('=') && !line.contains(':'))
        }) {
            return Some(ConfigFormat::Toml);
        }

        if trimmed.starts_with("---")
            || trimmed
                .lines()
                .any(|line| line.contains(": ") || line.trim_end().ends_with(':'))
        {
            return Some(ConfigFormat::Yaml);
        }

        None
    }
}

/// Figment provider that picks the parser from the file extension
pub enum SmartProvider {
    Toml(figment::providers::Data<Toml>),
    Json(figment::providers::Data<Json>),
    Yaml(figment::providers::Data<Yaml>),
}

impl SmartProvider {
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).or_else(|| {
            let content = std::fs::read_to_string(path).ok()?;
            let detected = ConfigFormat::detect(&content);
            tracing::debug!("detected {:?} for {}", detected, path.display());
            detected
        });

        match format.unwrap_or(ConfigFormat::Toml) {
            ConfigFormat::Toml => SmartProvider::Toml(Toml::file(path)),
            ConfigFormat::Json => SmartProvider::Json(Json::file(path)),
            ConfigFormat::Yaml => SmartProvider::Yaml(Yaml::file(path)),
        }
    }
}

impl figment::Provider for SmartProvider {
    fn metadata(&self) -> figment::Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(
        &self,
    ) -> Result<figment::value::Map<figment::Profile, figment::value::Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

impl AuthorGuardConfig {
    /// Export the merged configuration in the given format
    pub fn export_config(&self, format: ConfigFormat) -> Result<String> {
        let config: serde_json::Value = self.get_full_config()?;

        let output = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
            ConfigFormat::Toml => toml::to_string_pretty(&config)?,
            ConfigFormat::Yaml => serde_yml::to_string(&config)?,
        };

        Ok(output)
    }
}
