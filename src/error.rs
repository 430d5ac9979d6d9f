use thiserror::Error;

/// Errors raised while fetching statistics or rendering the report.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The command could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited with a non-zero status.
    #[error("{stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The command exited successfully but wrote to stderr.
    #[error("unexpected stderr output: {0}")]
    UnexpectedStderr(String),

    #[error("malformed JSON from statistics tool: {0}")]
    Json(#[from] serde_json::Error),

    #[error("can't find {0}")]
    PackageNotFound(String),

    #[error("row has no `{0}` field")]
    MissingField(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
