use std::path::PathBuf;

use thiserror::Error;

/// The main error type for monoflow operations
#[derive(Debug, Error)]
pub enum MonoflowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("workspace error: {0}")]
    Workspace(String),

    #[error("dependency installation failed with exit code {code}")]
    Install { code: i32 },

    #[error("task '{task}' failed for package '{package}' with exit code {code}")]
    TaskExecution {
        package: String,
        task: String,
        code: i32,
    },
}

/// Result type alias for monoflow operations
pub type MonoflowResult<T> = Result<T, MonoflowError>;
