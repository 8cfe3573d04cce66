use std::path::PathBuf;

use crate::config::{BenchConfig, Installation};

/// Everything the orchestrator needs besides the command list.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub executable: PathBuf,
    pub use_shell: bool,
    /// Working directory for commands flagged to run inside the target project.
    pub target_dir: Option<PathBuf>,
    pub cache_dir: PathBuf,
    pub version: Option<String>,
    /// Print start/end lines for each command.
    pub echo: bool,
}

impl RunConfig {
    pub fn from_installation(cfg: &BenchConfig, install: &Installation) -> Self {
        Self {
            executable: install.executable.clone(),
            use_shell: install.use_shell,
            target_dir: cfg.resolve_target_dir(),
            cache_dir: cfg.cache_path(),
            version: install.version.clone(),
            echo: true,
        }
    }
}
