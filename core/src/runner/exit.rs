use super::types::ExitOutcome;

pub fn classify_exit(status: std::process::ExitStatus) -> ExitOutcome {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            ExitOutcome::Exited { code }
        } else if let Some(sig) = status.signal() {
            ExitOutcome::Signaled {
                signal: signal_name(sig),
            }
        } else {
            ExitOutcome::Exited { code: 1 }
        }
    }
    #[cfg(windows)]
    {
        ExitOutcome::Exited {
            code: status.code().unwrap_or(1),
        }
    }
}

#[cfg(unix)]
pub fn signal_name(sig: i32) -> String {
    nix::sys::signal::Signal::try_from(sig)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("signal {}", sig))
}
