use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::BenchError;

use super::load::expand_path;
use super::types::BenchConfig;

/// Where the tool under test lives and how to invoke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub dir: PathBuf,
    pub executable: PathBuf,
    pub use_shell: bool,
    pub version: Option<String>,
}

#[derive(Deserialize)]
struct PackageManifest {
    version: Option<String>,
}

pub fn first_existing_dir<I, P>(choices: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    choices
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .find(|p| p.is_dir())
}

impl BenchConfig {
    /// Resolves the install directory from an explicit path, the config, or
    /// the first existing candidate.
    pub fn resolve_installation(&self, explicit: Option<&Path>) -> Result<Installation, BenchError> {
        let dir = match (explicit, self.install_dir.as_deref()) {
            (Some(p), _) => Some(p.to_path_buf()).filter(|p| p.is_dir()),
            (None, Some(raw)) => Some(expand_path(raw)).filter(|p| p.is_dir()),
            (None, None) => {
                first_existing_dir(self.install_candidates.iter().map(|c| expand_path(c)))
            }
        }
        .ok_or_else(|| BenchError::Config(format!("unable to find an install directory for {}", self.tool)))?;

        let use_shell = cfg!(windows);
        let bin_name = if use_shell {
            format!("{}.cmd", self.tool)
        } else {
            self.tool.clone()
        };
        let executable = dir.join("bin").join(bin_name);
        let version = read_package_version(&dir)?;

        Ok(Installation {
            dir,
            executable,
            use_shell,
            version,
        })
    }

    /// Working directory for commands flagged to run inside the target project.
    pub fn resolve_target_dir(&self) -> Option<PathBuf> {
        match self.target_dir.as_deref() {
            Some(raw) => Some(expand_path(raw)),
            None => first_existing_dir(self.target_candidates.iter().map(|c| expand_path(c))),
        }
    }
}

/// Reads `version` from `<dir>/package.json`; a missing manifest yields `None`.
pub fn read_package_version(dir: &Path) -> Result<Option<String>, BenchError> {
    let path = dir.join("package.json");
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(BenchError::Io(e)),
    };
    let manifest: PackageManifest = serde_json::from_str(&raw).map_err(|e| {
        BenchError::Config(format!("invalid package manifest {}: {}", path.display(), e))
    })?;
    Ok(manifest.version.filter(|v| !v.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_existing_dir_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let found = first_existing_dir([missing.as_path(), dir.path()]);
        assert_eq!(found.as_deref(), Some(dir.path()));
    }

    #[test]
    fn first_existing_dir_none_when_all_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(first_existing_dir([dir.path().join("a"), dir.path().join("b")]), None);
    }

    #[test]
    fn resolve_installation_reads_version_from_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "apm", "version": "2.4.3"}"#,
        )
        .unwrap();

        let cfg = BenchConfig::default();
        let install = cfg.resolve_installation(Some(dir.path())).unwrap();
        assert_eq!(install.version.as_deref(), Some("2.4.3"));
        assert!(install.executable.starts_with(dir.path().join("bin")));
    }

    #[test]
    fn resolve_installation_without_manifest_is_unlabeled() {
        let dir = tempfile::tempdir().unwrap();
        let install = BenchConfig::default()
            .resolve_installation(Some(dir.path()))
            .unwrap();
        assert_eq!(install.version, None);
    }

    #[test]
    fn resolve_installation_fails_for_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = BenchConfig::default()
            .resolve_installation(Some(&dir.path().join("nope")))
            .unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn resolve_target_dir_prefers_explicit_value() {
        let cfg = BenchConfig {
            target_dir: Some("/srv/github".into()),
            ..BenchConfig::default()
        };
        assert_eq!(cfg.resolve_target_dir(), Some(PathBuf::from("/srv/github")));
    }
}
