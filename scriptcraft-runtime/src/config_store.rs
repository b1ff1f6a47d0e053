use anyhow::{Context, bail};
use scriptcraft_core::config::AppConfig;

use crate::atomic::write_file_atomic;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_MODEL: &str = "SCRIPTCRAFT_MODEL";
pub const ENV_BASE_URL: &str = "SCRIPTCRAFT_BASE_URL";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<AppConfig> {
        let bytes =
            fs::read(&self.path).with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: AppConfig = serde_json::from_slice(&bytes).context("decode config JSON")?;
        Ok(cfg)
    }

    /// A missing file yields the defaults; a broken one is still an error.
    pub fn load_or_default(&self) -> anyhow::Result<AppConfig> {
        if !self.path.exists() {
            log::debug!("no config at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }
        self.load()
    }

    pub fn save(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        write_file_atomic(&self.path, &json)
            .with_context(|| format!("save config: {}", self.path.display()))
    }

    /// Writes the default config. An existing file is kept unless `overwrite`.
    pub fn init_defaults(&self, overwrite: bool) -> anyhow::Result<AppConfig> {
        if self.path.exists() && !overwrite {
            bail!(
                "config already exists: {} (pass --force to replace it)",
                self.path.display()
            );
        }
        let cfg = AppConfig::default();
        self.save(&cfg)?;
        log::info!("wrote default config to {}", self.path.display());
        Ok(cfg)
    }
}

/// Environment variables take precedence over the stored config.
pub fn apply_env_overrides<F>(mut cfg: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
        cfg.gemini_model = model.trim().to_string();
    }
    if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
        cfg.gemini_base_url = url.trim().to_string();
    }
    cfg
}
