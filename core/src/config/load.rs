use std::path::{Path, PathBuf};

use crate::error::BenchError;

use super::types::BenchConfig;

pub const DEFAULT_CONFIG_FILE: &str = "cmdbench.toml";

pub fn load_default() -> Result<BenchConfig, BenchError> {
    let mut cfg = if Path::new(DEFAULT_CONFIG_FILE).exists() {
        parse_file(Path::new(DEFAULT_CONFIG_FILE))?
    } else {
        BenchConfig::default()
    };
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn load_from(path: &Path) -> Result<BenchConfig, BenchError> {
    if !path.exists() {
        return Err(BenchError::Config(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    let mut cfg = parse_file(path)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn parse_file(path: &Path) -> Result<BenchConfig, BenchError> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<BenchConfig>(&s).map_err(|source| BenchError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), commands = cfg.commands.len(), "loaded config");
    Ok(cfg)
}

fn apply_env_overrides(cfg: &mut BenchConfig) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

/// Applies `CMDBENCH_*` overrides from `lookup`; blank values are ignored.
fn apply_overrides<F>(cfg: &mut BenchConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    if let Some(v) = value("CMDBENCH_REPORT_FILE") {
        cfg.report_file = v;
    }
    if let Some(v) = value("CMDBENCH_CACHE_DIR") {
        cfg.cache_dir = v;
    }
    if let Some(v) = value("CMDBENCH_TARGET_DIR") {
        cfg.target_dir = Some(v);
    }
}

/// Expands a leading `~` against the user's home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    let home = || dirs::home_dir().map(|h| h.to_string_lossy().into_owned());
    PathBuf::from(shellexpand::tilde_with_context(raw, home).into_owned())
}

impl BenchConfig {
    pub fn report_path(&self) -> PathBuf {
        expand_path(&self.report_file)
    }

    pub fn cache_path(&self) -> PathBuf {
        expand_path(&self.cache_dir)
    }
}
