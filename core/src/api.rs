//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `cmdbench_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, load_from, BenchConfig, CommandSpec, Installation};
pub use crate::engine::{execute_sequence, Orchestrator, RunConfig};
pub use crate::error::BenchError;
pub use crate::report::{render, MergeOutcome, PersistedReport, Report, ReportStore};
pub use crate::runner::{
    run_command, CommandResult, CommandRunner, ExitOutcome, Invocation, ProcessRunner,
};
