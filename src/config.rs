// ⚙️ Client configuration - API roots and asset locations
// Defaults match the production API; every field can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_ROOT: &str = "https://api.monzo.com";
pub const DEFAULT_AUTH_ROOT: &str = "https://auth.monzo.com";
pub const DEFAULT_ICON_DIR: &str = "./assets/icons";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root that request descriptor paths are resolved against
    pub api_root: String,

    /// Root of the OAuth consent page
    pub auth_root: String,

    /// Directory holding the fallback transaction icons
    pub icon_dir: String,
}

impl ClientConfig {
    /// Build config from `MONZO_API_ROOT`, `MONZO_AUTH_ROOT` and `MONZO_ICON_DIR`,
    /// falling back to the defaults for unset or empty variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        ClientConfig {
            api_root: read("MONZO_API_ROOT", DEFAULT_API_ROOT),
            auth_root: read("MONZO_AUTH_ROOT", DEFAULT_AUTH_ROOT),
            icon_dir: read("MONZO_ICON_DIR", DEFAULT_ICON_DIR),
        }
    }

    /// Path of a named icon inside `icon_dir`
    pub fn icon_path(&self, name: &str) -> String {
        format!("{}/{}.png", self.icon_dir.trim_end_matches('/'), name)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_root: DEFAULT_API_ROOT.to_string(),
            auth_root: DEFAULT_AUTH_ROOT.to_string(),
            icon_dir: DEFAULT_ICON_DIR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root, "https://api.monzo.com");
        assert_eq!(config.icon_path("topup"), "./assets/icons/topup.png");
    }

    #[test]
    fn test_lookup_overrides_and_ignores_blank() {
        let vars: HashMap<&str, &str> = [
            ("MONZO_API_ROOT", "http://localhost:8080"),
            ("MONZO_AUTH_ROOT", "  "),
            ("MONZO_ICON_DIR", "/srv/icons/"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_root, "http://localhost:8080");
        assert_eq!(config.auth_root, DEFAULT_AUTH_ROOT);
        assert_eq!(config.icon_path("peer"), "/srv/icons/peer.png");
    }
}
