//! Session configuration: where the engine lives and who is using it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "kit.json";
pub const ENV_API_URL: &str = "KIT_API_URL";
pub const ENV_USER: &str = "KIT_USER";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    pub api_url: String,
    pub username: Option<String>,
    pub workspace_prefix: String,
    pub request_timeout_secs: u64,
    pub log_dir: PathBuf,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            username: None,
            workspace_prefix: "workspaces".to_string(),
            request_timeout_secs: 30,
            log_dir: PathBuf::from(".kit").join("logs"),
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub username: Option<String>,
}

impl KitConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(cfg)
    }

    /// Defaults, then `explicit` (or `kit.json` in `cwd` when present), then
    /// the environment as seen through `env`, then `overrides`.
    pub fn load(
        explicit: Option<&Path>,
        cwd: &Path,
        env: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let mut cfg = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let implicit = cwd.join(CONFIG_FILE);
                if implicit.is_file() {
                    Self::from_file(&implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(url) = env(ENV_API_URL).filter(|s| !s.is_empty()) {
            cfg.api_url = url;
        }
        if let Some(user) = env(ENV_USER).filter(|s| !s.is_empty()) {
            cfg.username = Some(user);
        }
        if let Some(url) = overrides.api_url {
            cfg.api_url = url;
        }
        if let Some(user) = overrides.username {
            cfg.username = Some(user);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let user = self.username()?;
        if user.contains('/') {
            anyhow::bail!("username must not contain '/': {}", user);
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must be an http(s) URL: {}", self.api_url);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }

    pub fn username(&self) -> Result<&str> {
        match self.username.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => Ok(u),
            _ => anyhow::bail!("no username configured (use --user, {} or {})", ENV_USER, CONFIG_FILE),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
#[path = "tests/config/config_tests.rs"]
mod tests;
