use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The I/O step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Open,
    Read,
    Write,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOp::Open => write!(f, "open"),
            IoOp::Read => write!(f, "read"),
            IoOp::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FreqError {
    #[error("failed to {op} {}: {source}", display_path(.path))]
    Io {
        op: IoOp,
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
    #[error("out of memory while {context}")]
    OutOfMemory { context: &'static str },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FreqError {
    pub fn io(op: IoOp, source: io::Error) -> Self {
        Self::Io {
            op,
            path: None,
            source,
        }
    }

    pub fn io_at(op: IoOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: Some(path.into()),
            source,
        }
    }

    pub fn out_of_memory(context: &'static str) -> Self {
        Self::OutOfMemory { context }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Attaches a path to an I/O error that was raised without one.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io {
                op,
                path: None,
                source,
            } => Self::Io {
                op,
                path: Some(path.into()),
                source,
            },
            other => other,
        }
    }

    /// Short, stable name of the failure kind for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { op: IoOp::Open, .. } => "open error",
            Self::Io { op: IoOp::Read, .. } => "read error",
            Self::Io { op: IoOp::Write, .. } => "write error",
            Self::OutOfMemory { .. } => "out of memory",
            Self::InvalidArgument(_) => "invalid argument",
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "stream".to_string(),
    }
}

pub type FreqResult<T> = Result<T, FreqError>;
