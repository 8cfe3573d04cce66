pub mod exit;
mod run;
mod traits;
pub mod types;

pub use run::{run_command, ProcessRunner};
pub use traits::CommandRunner;
pub use types::{CommandResult, ExitOutcome, Invocation};
