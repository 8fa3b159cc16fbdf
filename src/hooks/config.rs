use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HookConfig {
    #[serde(flatten)]
    pub hooks: BTreeMap<String, HookDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HookDefinition {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionDefinition {
    /// Builtin action name, e.g. `validate_author`
    pub action: String,

    /// Action specific options, interpreted by the action itself
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl HookConfig {
    pub fn get(&self, hook_name: &str) -> Option<&HookDefinition> {
        self.hooks.get(hook_name)
    }

    /// Names of hooks that are switched on
    pub fn enabled_hooks(&self) -> Vec<&str> {
        self.hooks
            .iter()
            .filter(|(_, def)| def.enabled)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// First action named `action` in `hook_name`
    pub fn find_action(&self, hook_name: &str, action: &str) -> Option<&ActionDefinition> {
        self.get(hook_name)?
            .actions
            .iter()
            .find(|def| def.action == action)
    }
}
