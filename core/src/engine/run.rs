use crate::config::CommandSpec;
use crate::error::BenchError;
use crate::report::Report;
use crate::runner::{CommandResult, CommandRunner, Invocation, ProcessRunner};

use super::cache::clear_cache;
use super::types::RunConfig;

/// Drives a command list through a runner, one command at a time.
pub struct Orchestrator<R: CommandRunner = ProcessRunner> {
    config: RunConfig,
    runner: R,
}

impl Orchestrator<ProcessRunner> {
    pub fn with_processes(config: RunConfig) -> Self {
        Self::new(config, ProcessRunner::new())
    }
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(config: RunConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs `specs` in order and collects a report.
    ///
    /// Subprocess failures are recorded and the sequence continues; a cache
    /// that cannot be cleared aborts the whole run.
    pub async fn execute_sequence(&self, specs: &[CommandSpec]) -> Result<Report, BenchError> {
        let mut report = Report::new(self.config.version.clone());
        tracing::info!(
            target: "cmdbench.engine",
            commands = specs.len(),
            version = ?self.config.version,
            "starting sequence"
        );

        for spec in specs {
            if let Some(result) = self.run_one(spec).await? {
                report.record(result);
            }
        }

        report.finish();
        tracing::info!(
            target: "cmdbench.engine",
            successes = report.successes,
            failures = report.failures,
            total_ms = report.total_duration_ms(),
            "sequence finished"
        );
        Ok(report)
    }

    async fn run_one(&self, spec: &CommandSpec) -> Result<Option<CommandResult>, BenchError> {
        let identity = spec.identity();

        let current_dir = if spec.run_in_target_directory {
            let dir = self.config.target_dir.clone().ok_or_else(|| {
                BenchError::Config(format!("'{}' needs a target directory but none is configured", identity))
            })?;
            Some(dir)
        } else {
            None
        };

        if spec.clean_cache {
            clear_cache(&self.config.cache_dir).await?;
        }

        let invocation = Invocation {
            identity,
            executable: self.config.executable.clone(),
            args: spec.args.clone(),
            use_shell: self.config.use_shell,
            current_dir,
            echo: self.config.echo,
        };
        let result = self.runner.run(&invocation).await;

        if spec.omit_from_report {
            tracing::debug!(target: "cmdbench.engine", identity = %result.identity, "result omitted from report");
            return Ok(None);
        }
        Ok(Some(result))
    }
}

/// Runs `specs` as real subprocesses.
pub async fn execute_sequence(config: &RunConfig, specs: &[CommandSpec]) -> Result<Report, BenchError> {
    Orchestrator::with_processes(config.clone())
        .execute_sequence(specs)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ExitOutcome;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    /// Replays scripted outcomes keyed by identity and records every call.
    #[derive(Default)]
    struct ScriptedRunner {
        outcomes: HashMap<String, ExitOutcome>,
        calls: Mutex<Vec<Invocation>>,
        cache_probe: Option<PathBuf>,
        cache_seen: Mutex<Vec<bool>>,
    }

    impl ScriptedRunner {
        fn with(mut self, identity: &str, outcome: ExitOutcome) -> Self {
            self.outcomes.insert(identity.to_string(), outcome);
            self
        }

        fn probing(mut self, cache: &Path) -> Self {
            self.cache_probe = Some(cache.to_path_buf());
            self
        }

        fn identities(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|i| i.identity.clone())
                .collect()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, invocation: &Invocation) -> CommandResult {
            if let Some(probe) = &self.cache_probe {
                self.cache_seen.lock().unwrap().push(probe.exists());
            }
            self.calls.lock().unwrap().push(invocation.clone());
            CommandResult {
                identity: invocation.identity.clone(),
                args: invocation.args.clone(),
                duration_ms: 5,
                outcome: self
                    .outcomes
                    .get(&invocation.identity)
                    .cloned()
                    .unwrap_or(ExitOutcome::Exited { code: 0 }),
            }
        }
    }

    fn config(cache_dir: &Path) -> RunConfig {
        RunConfig {
            executable: PathBuf::from("/opt/tool/bin/apm"),
            use_shell: false,
            target_dir: Some(PathBuf::from("/srv/github")),
            cache_dir: cache_dir.to_path_buf(),
            version: Some("1.0.0".into()),
            echo: false,
        }
    }

    #[tokio::test]
    async fn empty_sequence_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let orch = Orchestrator::new(config(dir.path()), ScriptedRunner::default());

        let report = orch.execute_sequence(&[]).await.unwrap();
        assert!(report.commands.is_empty());
        assert_eq!((report.successes, report.failures), (0, 0));
        assert!(report.ended_at.is_some());
        assert_eq!(report.version.as_deref(), Some("1.0.0"));
    }

    #[tokio::test]
    async fn runs_in_order_and_counts_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::default()
            .with("fails", ExitOutcome::Exited { code: 1 })
            .with("killed", ExitOutcome::Signaled { signal: "SIGKILL".into() })
            .with("missing", ExitOutcome::SpawnFailed { error: "ENOENT".into() });
        let specs = vec![
            CommandSpec::new("ok", ["install", "a"]),
            CommandSpec::new("fails", ["install", "b"]),
            CommandSpec::new("killed", ["install", "c"]),
            CommandSpec::new("missing", ["install", "d"]),
        ];
        let orch = Orchestrator::new(config(dir.path()), runner);

        let report = orch.execute_sequence(&specs).await.unwrap();
        assert_eq!(
            orch.runner.identities(),
            vec!["ok", "fails", "killed", "missing"]
        );
        assert_eq!(report.successes, 1);
        assert_eq!(report.failures, 3);
        assert_eq!(report.commands[2].code(), None);
        assert_eq!(report.commands[2].signal(), Some("SIGKILL"));
    }

    #[tokio::test]
    async fn omitted_commands_run_but_leave_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let specs = vec![
            CommandSpec::new("version", ["--version"]).omitted(),
            CommandSpec::new("install", ["install", "a"]),
            CommandSpec::new("cleanup", ["uninstall", "a"]).omitted(),
        ];
        let orch = Orchestrator::new(config(dir.path()), ScriptedRunner::default());

        let report = orch.execute_sequence(&specs).await.unwrap();
        assert_eq!(orch.runner.identities().len(), 3);
        assert_eq!(report.commands.len(), 1);
        assert_eq!(report.commands[0].identity, "install");
        let reported = specs.iter().filter(|s| !s.omit_from_report).count();
        assert_eq!(report.successes + report.failures, reported);
    }

    #[tokio::test]
    async fn unnamed_commands_use_encoded_args_as_identity() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec {
            name: None,
            ..CommandSpec::new("", ["rebuild", "hydrogen"])
        };
        let orch = Orchestrator::new(config(dir.path()), ScriptedRunner::default());

        let report = orch.execute_sequence(&[spec]).await.unwrap();
        assert_eq!(report.commands[0].identity, r#"["rebuild","hydrogen"]"#);
    }

    #[tokio::test]
    async fn cache_is_cleared_before_flagged_commands_only() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join(".apm");
        std::fs::create_dir_all(&cache).unwrap();

        let specs = vec![
            CommandSpec::new("warm", ["install", "a"]),
            CommandSpec::new("cold", ["install", "b"]).cleaning_cache(),
        ];
        let orch = Orchestrator::new(config(&cache), ScriptedRunner::default().probing(&cache));

        orch.execute_sequence(&specs).await.unwrap();
        assert_eq!(*orch.runner.cache_seen.lock().unwrap(), vec![true, false]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cache_clear_failure_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain-file");
        std::fs::write(&file, "x").unwrap();

        let specs = vec![
            CommandSpec::new("first", ["install", "a"]),
            CommandSpec::new("cold", ["install", "b"]).cleaning_cache(),
            CommandSpec::new("never", ["install", "c"]),
        ];
        let orch = Orchestrator::new(config(&file.join("cache")), ScriptedRunner::default());

        let err = orch.execute_sequence(&specs).await.unwrap_err();
        assert!(matches!(err, BenchError::CacheClear { .. }));
        assert_eq!(orch.runner.identities(), vec!["first"]);
    }

    #[tokio::test]
    async fn target_directory_is_scoped_to_flagged_commands() {
        let dir = tempfile::tempdir().unwrap();
        let specs = vec![
            CommandSpec::new("in repo", ["install"]).in_target_directory(),
            CommandSpec::new("elsewhere", ["rebuild"]),
        ];
        let orch = Orchestrator::new(config(dir.path()), ScriptedRunner::default());

        orch.execute_sequence(&specs).await.unwrap();
        let calls = orch.runner.calls.lock().unwrap();
        assert_eq!(calls[0].current_dir, Some(PathBuf::from("/srv/github")));
        assert_eq!(calls[1].current_dir, None);
    }

    #[tokio::test]
    async fn target_directory_required_when_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.target_dir = None;
        let orch = Orchestrator::new(cfg, ScriptedRunner::default());

        let err = orch
            .execute_sequence(&[CommandSpec::new("dedupe", ["dedupe"]).in_target_directory()])
            .await
            .unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
        assert!(orch.runner.identities().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn real_processes_record_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.executable = PathBuf::from("/bin/sh");
        let specs = vec![
            CommandSpec::new("pass", ["-c", "exit 0"]),
            CommandSpec::new("fail", ["-c", "exit 1"]),
            CommandSpec::new("signal", ["-c", "kill -TERM $$"]),
        ];

        let report = execute_sequence(&cfg, &specs).await.unwrap();
        assert_eq!(report.successes, 1);
        assert_eq!(report.failures, 2);
        assert_eq!(report.commands[1].code(), Some(1));
        assert_eq!(report.commands[2].signal(), Some("SIGTERM"));
    }
}
