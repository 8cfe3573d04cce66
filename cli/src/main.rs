use clap::Parser;
mod commands;
use cmdbench_core::config;
use commands::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => config::load_from(path)?,
        None => config::load_default()?,
    };
    tracing::debug!(
        tool = %cfg.tool,
        report = %cfg.report_path().display(),
        commands = cfg.commands.len(),
        "config resolved"
    );

    match args.command {
        cli::Commands::Run(run_args) => commands::run::handle_run(run_args, &cfg).await,
        cli::Commands::Table => commands::table::handle_table(&cfg).await,
    }
}
