use anyhow::{Context, Result};
use cmdbench_core::api::{render, BenchConfig, ReportStore};

pub async fn handle_table(cfg: &BenchConfig) -> Result<()> {
    let store = ReportStore::new(cfg.report_path());
    let report = store
        .load()
        .await?
        .with_context(|| format!("no report found at {}", store.path().display()))?;
    println!("{}", render(&report));
    Ok(())
}
