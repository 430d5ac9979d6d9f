pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod markdown;
pub mod report;
pub mod runner;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use client::StatsClient;
pub use config::Settings;
pub use error::StatsError;
pub use report::write_markdown;
pub use runner::{CachedRunner, CommandRunner, ShellRunner};
pub use stats::{Dimension, Overview, QueryResult, Row};
