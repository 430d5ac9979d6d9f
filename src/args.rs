use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pkgstats",
    about = "Print package download statistics as a Markdown report",
    version,
    long_about = None
)]
pub struct Args {
    /// Package to report on
    #[arg(short, long, default_value = "psutil")]
    pub package: String,

    /// Trailing window, in days
    #[arg(short, long, default_value_t = 30)]
    pub days: u32,

    /// Maximum number of projects fetched for the ranking
    #[arg(short, long, default_value_t = 100)]
    pub limit: u32,

    /// Statistics tool to invoke
    #[arg(long, default_value = "pypinfo")]
    pub tool: String,

    /// Credentials file handed to the statistics tool (defaults to ~/.pypinfo.json)
    #[arg(long)]
    pub auth_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
