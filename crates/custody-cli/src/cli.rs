use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use custody_ledger::UpdatePolicy;

#[derive(Parser)]
#[command(
    name = "custody",
    about = "Custody Ledger: tamper-evident tracking of pharmaceutical units",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured status update policy
    #[arg(long, global = true)]
    pub policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    /// Record each status change as a new entry
    Append,
    /// Overwrite the matching entry in place
    Rewrite,
}

impl From<PolicyArg> for UpdatePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Append => UpdatePolicy::AppendTransition,
            PolicyArg::Rewrite => UpdatePolicy::RewriteInPlace,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the interactive menu
    Shell(ShellArgs),
    /// Run a scripted walkthrough against a fresh ledger
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct ShellArgs {}

#[derive(Args)]
pub struct DemoArgs {
    /// Finish by editing a stored entry and re-verifying
    #[arg(long)]
    pub tamper: bool,
}
