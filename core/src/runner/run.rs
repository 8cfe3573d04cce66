use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::encode_args;

use super::exit::classify_exit;
use super::traits::CommandRunner;
use super::types::{CommandResult, ExitOutcome, Invocation};

/// Runs commands as real child processes sharing this process's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> CommandResult {
        run_command(invocation).await
    }
}

pub async fn run_command(invocation: &Invocation) -> CommandResult {
    let shown_args = encode_args(&invocation.args);
    if invocation.echo {
        println!(">>> {} - {}\n", invocation.identity, shown_args);
    }
    tracing::info!(
        target: "cmdbench.runner",
        identity = %invocation.identity,
        executable = %invocation.executable.display(),
        cwd = ?invocation.current_dir,
        shell = invocation.use_shell,
        "spawning command"
    );

    let mut cmd = build_command(invocation);
    let started = Instant::now();
    let outcome = match cmd.spawn() {
        Ok(mut child) => match child.wait().await {
            Ok(status) => classify_exit(status),
            Err(e) => ExitOutcome::SpawnFailed {
                error: format!("wait failed: {}", e),
            },
        },
        Err(e) => ExitOutcome::SpawnFailed {
            error: e.to_string(),
        },
    };
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    if let Some(err) = outcome.error() {
        tracing::error!(
            target: "cmdbench.runner",
            identity = %invocation.identity,
            error = %err,
            "spawn error"
        );
        if invocation.echo {
            eprintln!(">>> Spawn error for {}:\n{}", shown_args, err);
        }
    } else {
        tracing::info!(
            target: "cmdbench.runner",
            identity = %invocation.identity,
            code = ?outcome.code(),
            signal = ?outcome.signal(),
            duration_ms,
            "command finished"
        );
        if invocation.echo {
            println!("\n>>> {} {} in {}ms\n", shown_args, outcome.describe(), duration_ms);
        }
    }

    CommandResult {
        identity: invocation.identity.clone(),
        args: invocation.args.clone(),
        duration_ms,
        outcome,
    }
}

fn build_command(invocation: &Invocation) -> Command {
    let mut cmd = if invocation.use_shell {
        shell_command(invocation)
    } else {
        let mut c = Command::new(&invocation.executable);
        c.args(&invocation.args);
        c
    };
    if let Some(dir) = &invocation.current_dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    cmd
}

#[cfg(windows)]
fn shell_command(invocation: &Invocation) -> Command {
    let mut c = Command::new("cmd");
    c.arg("/C").arg(&invocation.executable).args(&invocation.args);
    c
}

// `"$0" "$@"` hands the executable and arguments through without re-splitting.
#[cfg(not(windows))]
fn shell_command(invocation: &Invocation) -> Command {
    let mut c = Command::new("sh");
    c.arg("-c")
        .arg(r#""$0" "$@""#)
        .arg(&invocation.executable)
        .args(&invocation.args);
    c
}
