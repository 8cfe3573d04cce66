mod cache;
mod run;
mod types;

pub use cache::clear_cache;
pub use run::{execute_sequence, Orchestrator};
pub use types::RunConfig;
