//! Error types for the icon build step

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for build operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building an icon
#[derive(Error, Debug)]
pub enum Error {
    /// An external program could not be launched because it is not installed
    #[error("{program} is not installed. {hint}")]
    ToolMissing { program: String, hint: String },

    /// An external program ran but exited unsuccessfully
    #[error("command `{command}` failed with {}", describe_code(.code))]
    ToolFailed { command: String, code: Option<i32> },

    /// The input vector image does not exist
    #[error("source image not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// Filesystem or process spawn failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io { context: context.into(), source }
    }

    /// Process exit status the binary should use for this error.
    ///
    /// A failing tool's own exit code is propagated; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolFailed { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
