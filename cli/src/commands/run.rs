use anyhow::Result;
use cmdbench_core::api::{execute_sequence, BenchConfig, MergeOutcome, ReportStore, RunConfig};

use crate::commands::cli::RunArgs;

pub async fn handle_run(args: RunArgs, cfg: &BenchConfig) -> Result<()> {
    let install = cfg.resolve_installation(args.install_path.as_deref())?;

    let mut run_cfg = RunConfig::from_installation(cfg, &install);
    if let Some(label) = args.label.filter(|l| !l.trim().is_empty()) {
        run_cfg.version = Some(label);
    }
    run_cfg.echo = !args.quiet;

    println!(
        ">>> Testing {} {} at {}",
        cfg.tool,
        run_cfg.version.as_deref().unwrap_or("(unlabeled)"),
        install.dir.display()
    );

    let report = execute_sequence(&run_cfg, &cfg.commands).await?;

    // The summary goes out before persistence so it survives a failed write.
    println!(">>> Report");
    for line in report.summary_lines() {
        println!("{}", line);
    }

    let store = ReportStore::new(cfg.report_path());
    match store.merge_and_persist(&report).await? {
        MergeOutcome::Written { path, .. } => {
            println!(">>> report written to {}", path.display())
        }
        MergeOutcome::Unlabeled => println!(">>> unlabeled run, report not written"),
        MergeOutcome::NothingToWrite => println!(">>> no reportable results"),
    }
    Ok(())
}
