use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io;
use tracing::error;

use pkgstats::{utils, write_markdown, Args, CachedRunner, Settings, ShellRunner, StatsClient};

fn run(args: &Args) -> Result<()> {
    let settings = Settings::from_args(args).context("Failed to resolve settings")?;
    let runner = CachedRunner::new(ShellRunner::new(settings.auth_file.clone()));
    let mut client = StatsClient::new(runner, settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_markdown(&mut client, &mut out, Local::now().date_naive())?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    if let Err(e) = run(&args) {
        error!(action = "failed", component = "main", error = %e, "Report generation failed");
        std::process::exit(1);
    }
    Ok(())
}
