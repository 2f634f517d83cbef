use clap::Parser;

mod cli;
mod commands;
mod config;
mod render;
mod session;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::resolve(cli.config.as_deref(), cli.policy)?;
    init_tracing(cli.verbose, &config);
    if let Some(color) = config.color {
        colored::control::set_override(color);
    }
    commands::run_command(cli, config)
}

fn init_tracing(verbose: bool, config: &config::CliConfig) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
