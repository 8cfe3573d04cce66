use async_trait::async_trait;

use super::types::{CommandResult, Invocation};

/// Executes one command to completion.
///
/// Implementations never fail: spawn errors are folded into the returned
/// result so a sequence can move on to the next command.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> CommandResult;
}
