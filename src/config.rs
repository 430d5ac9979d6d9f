use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::Args;

pub const DEFAULT_PACKAGE: &str = "psutil";
pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_LIMIT: u32 = 100;
pub const DEFAULT_TOOL: &str = "pypinfo";
pub const AUTH_FILE_NAME: &str = ".pypinfo.json";

/// Everything a report run needs to know about what to query and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub package: String,
    pub days: u32,
    pub limit: u32,
    pub tool: String,
    pub auth_file: PathBuf,
}

impl Settings {
    /// Default package, window, limit and tool, with the given credentials file.
    pub fn with_auth_file(auth_file: impl Into<PathBuf>) -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            days: DEFAULT_DAYS,
            limit: DEFAULT_LIMIT,
            tool: DEFAULT_TOOL.to_string(),
            auth_file: auth_file.into(),
        }
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        Self::from_args_in(args, home_dir().as_deref())
    }

    /// Like `from_args`, resolving the default credentials file under `home`.
    pub fn from_args_in(args: &Args, home: Option<&Path>) -> Result<Self> {
        let auth_file = match (&args.auth_file, home) {
            (Some(path), _) => path.clone(),
            (None, Some(home)) => home.join(AUTH_FILE_NAME),
            (None, None) => anyhow::bail!(
                "Cannot determine home directory; pass --auth-file explicitly"
            ),
        };

        let settings = Self {
            package: args.package.clone(),
            days: args.days,
            limit: args.limit,
            tool: args.tool.clone(),
            auth_file,
        };
        info!(action = "resolve", component = "settings", package = %settings.package, days = settings.days, limit = settings.limit, auth_file = ?settings.auth_file, "Settings resolved");
        Ok(settings)
    }
}

/// `HOME`, falling back to `USERPROFILE`.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
