//! Pipeline error types and context helpers.
//!
//! Fatal conditions are errors; an expected native-tool failure is not.
//! Platform build failure is reported through
//! [`Outcome::PackageFailed`](super::Outcome::PackageFailed) and a shutdown
//! request through [`Outcome::Interrupted`](super::Outcome::Interrupted),
//! neither of which pass through this module.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pipeline invocation
#[derive(Error, Debug)]
pub enum Error {
    /// The front-end bundler failed. Fatal; native state untouched at this point.
    #[error("bundler failed: {0}")]
    Bundle(String),

    /// The bridge CLI exited non-zero. Fatal; surfaced after the bridge
    /// config has been reset.
    #[error("bridge CLI failed{}", exit_code_label(.code))]
    BridgeCli {
        /// Exit code of the bridge CLI process, if any
        code: Option<i32>,
    },

    /// An external command could not be spawned or awaited.
    #[error("failed to run `{command}`: {source}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying spawn/wait error
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed at a known path.
    #[error("{action} ({path}): {source}")]
    Fs {
        /// What was being done
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// IO errors without path context
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Bridge config (de)serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Everything else
    #[error("{0}")]
    Generic(String),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

/// Attaches a message to `Option`/`Result` values, producing a pipeline error.
pub trait Context<T> {
    /// Convert to a pipeline `Result`, using `msg` as the error context.
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| Error::Generic(msg.into()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Generic(format!("{}: {}", msg.into(), e)))
    }
}

/// Adds path-aware context to filesystem results.
pub trait ErrorExt<T> {
    /// Wrap an I/O error with the action that failed and the path involved.
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::Generic`](crate::pipeline::Error::Generic)
/// built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::pipeline::Error::Generic(format!($($arg)*)).into())
    };
}
