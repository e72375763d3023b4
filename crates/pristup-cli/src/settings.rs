//! Settings file loading.
//!
//! Reads `config/default.toml` (sections `[analyzer]` and `[web]`).  A
//! missing file yields the defaults; `PRISTUP_*` environment variables
//! override whatever the file says.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use pristup_intent::AnalyzerConfig;
use pristup_web::WebConfig;

/// Everything the binary reads from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analyzer: AnalyzerConfig,
    pub web: WebConfig,
}

impl Settings {
    /// Load from `path`, falling back to defaults when the file is absent,
    /// then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::from_toml(&content).with_context(|| format!("invalid {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            Self::default()
        };

        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings
            .analyzer
            .validate()
            .context("invalid [analyzer] settings")?;
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `PRISTUP_POLL_INTERVAL_MS`, `PRISTUP_MAX_ATTEMPTS`,
    /// `PRISTUP_BIND` and `PRISTUP_PORT`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PRISTUP_POLL_INTERVAL_MS") {
            self.analyzer.poll_interval_ms = v
                .trim()
                .parse()
                .with_context(|| format!("PRISTUP_POLL_INTERVAL_MS is not a number: {v}"))?;
        }
        if let Some(v) = lookup("PRISTUP_MAX_ATTEMPTS") {
            self.analyzer.max_attempts = v
                .trim()
                .parse()
                .with_context(|| format!("PRISTUP_MAX_ATTEMPTS is not a number: {v}"))?;
        }
        if let Some(v) = lookup("PRISTUP_BIND").filter(|v| !v.trim().is_empty()) {
            self.web.bind_addr = v.trim().to_owned();
        }
        if let Some(v) = lookup("PRISTUP_PORT") {
            self.web.port = v
                .trim()
                .parse()
                .with_context(|| format!("PRISTUP_PORT is not a port: {v}"))?;
        }
        Ok(())
    }
}
