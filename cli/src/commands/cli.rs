use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Time a tool's commands and compare them across versions")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file describing the tool and its command suite.
    /// Defaults to ./cmdbench.toml when present, otherwise built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Installation under test. Defaults to the first existing configured candidate.
    pub install_path: Option<PathBuf>,

    /// Version label to file durations under, overriding the installation's package.json.
    #[arg(long)]
    pub label: Option<String>,

    /// Do not print per-command start/end lines.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the command suite and merge durations into the report file.
    Run(RunArgs),
    /// Print the accumulated report as a comparison table.
    Table,
}
