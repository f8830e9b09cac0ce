mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let config = platform::config::Cli::parse().into_config()?;
    checker_logging::initialize(&config.log);
    platform::app::run_app(config)
}
