mod store;
pub mod table;
mod types;

pub use store::{MergeOutcome, PersistedReport, ReportStore};
pub use table::render;
pub use types::Report;
