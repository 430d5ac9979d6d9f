use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::StatsError;

/// Environment variable the statistics tool reads its credentials path from.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Runs a command string and hands back its output.
pub trait CommandRunner {
    fn run(&mut self, command: &str) -> Result<String, StatsError>;
}

/// Executes commands through `sh -c`.
///
/// Success requires both a zero exit status and an empty stderr; any
/// stderr output is treated as fatal.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    auth_file: PathBuf,
}

impl ShellRunner {
    pub fn new(auth_file: impl Into<PathBuf>) -> Self {
        Self {
            auth_file: auth_file.into(),
        }
    }

    fn shell(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command: &str) -> Result<String, StatsError> {
        let start_time = Instant::now();
        info!(action = "start", component = "shell", command = command, "Running command");

        let output = Self::shell(command)
            .env(CREDENTIALS_ENV, &self.auth_file)
            .output()
            .map_err(|source| StatsError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        info!(
            action = "complete",
            component = "shell",
            command = command,
            exit_code = ?output.status.code(),
            duration_ms = start_time.elapsed().as_millis(),
            "Command finished"
        );

        if !output.status.success() {
            return Err(StatsError::CommandFailed {
                command: command.to_string(),
                stderr: stderr.into_owned(),
            });
        }
        if !stderr.is_empty() {
            return Err(StatsError::UnexpectedStderr(stderr.into_owned()));
        }

        Ok(stdout.trim().to_string())
    }
}

/// Memoizes another runner so each distinct command string runs at most once.
#[derive(Debug)]
pub struct CachedRunner<R> {
    inner: R,
    cache: HashMap<String, String>,
}

impl<R: CommandRunner> CachedRunner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: CommandRunner> CommandRunner for CachedRunner<R> {
    fn run(&mut self, command: &str) -> Result<String, StatsError> {
        if let Some(out) = self.cache.get(command) {
            debug!(action = "hit", component = "command_cache", command = command, "Reusing cached output");
            return Ok(out.clone());
        }

        let out = self.inner.run(command)?;
        self.cache.insert(command.to_string(), out.clone());
        Ok(out)
    }
}
