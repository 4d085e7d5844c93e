//! Per-space config: parse .hirebox.toml (owner, inbox, referral, watch).

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::inbox::store::StoreOptions;
use crate::resolve;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HireboxConfig {
    #[serde(default)]
    pub owner: Option<OwnerConfig>,
    #[serde(default)]
    pub inbox: InboxConfig,
    #[serde(default)]
    pub referral: ReferralConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl OwnerConfig {
    /// "Name <email>", or whichever half is set. `None` when both are empty.
    pub fn signature(&self) -> Option<String> {
        match (self.name.trim(), self.email.trim()) {
            ("", "") => None,
            (name, "") => Some(name.to_string()),
            ("", email) => Some(email.to_string()),
            (name, email) => Some(format!("{} <{}>", name, email)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Keep replies and forwards across sessions.
    #[serde(default = "default_true")]
    pub persist_composed: bool,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            persist_composed: true,
        }
    }
}

impl InboxConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            persist_composed: self.persist_composed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralConfig {
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    #[serde(default = "default_fallback_reward")]
    pub fallback_reward: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            fallback_reward: default_fallback_reward(),
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_submit_delay_ms() -> u64 {
    1500
}
fn default_fallback_reward() -> u32 {
    500
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_poll_interval() -> u64 {
    2
}

/// Load .hirebox.toml from a given path or the resolved data directory.
pub fn load_config(path: Option<&Path>) -> Result<HireboxConfig> {
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(resolve::hirebox_toml);
    if !path.exists() {
        bail!(
            ".hirebox.toml not found at {}.\nRun 'hirebox init' to create it.",
            path.display()
        );
    }
    let content = std::fs::read_to_string(&path)?;
    let config: HireboxConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load config, falling back to defaults when the file doesn't exist.
///
/// A file that exists but fails to parse is still an error.
pub fn load_or_default(path: Option<&Path>) -> Result<HireboxConfig> {
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(resolve::hirebox_toml);
    if !path.exists() {
        return Ok(HireboxConfig::default());
    }
    load_config(Some(&path))
}

/// Try loading config, returning None if the file is missing or malformed.
pub fn try_load_config(path: Option<&Path>) -> Option<HireboxConfig> {
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(resolve::hirebox_toml);
    if !path.exists() {
        return None;
    }
    let content = std::fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(name: &str, email: &str) -> OwnerConfig {
        OwnerConfig {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_owner_signature() {
        assert_eq!(
            owner("Robin", "robin@acme.test").signature().as_deref(),
            Some("Robin <robin@acme.test>")
        );
        assert_eq!(owner("", "robin@acme.test").signature().as_deref(), Some("robin@acme.test"));
        assert_eq!(owner("Robin", " ").signature().as_deref(), Some("Robin"));
        assert_eq!(owner("", "").signature(), None);
    }
}
