use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlfigError {
    #[error("Invalid configuration file {}: {source}", origin(.path.as_deref()))]
    InvalidConfigurationFile {
        path: Option<PathBuf>,
        source: ParseError,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {reason}")]
    Serialize { reason: String },

    #[error("Reference cycle detected: {chain}")]
    ReferenceCycle { chain: String },

    #[error("Reference '{path}' did not resolve and declares no default")]
    UnresolvedReference { path: String },

    #[error("Unsupported operation '{0}'")]
    UnsupportedOperation(String),

    #[error("Invalid store snapshot {path}: {reason}")]
    Snapshot { path: PathBuf, reason: String },

    #[error("Loader options error: {0}")]
    Options(#[from] confique::Error),
}

impl YamlfigError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        YamlfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn origin(path: Option<&Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<text>".to_string(),
    }
}

/// A syntax or structure error reported by a [`Codec`](crate::codec::Codec).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Wrap into the crate error, attributing it to `path` when known.
    pub fn in_file(self, path: Option<&Path>) -> YamlfigError {
        YamlfigError::InvalidConfigurationFile {
            path: path.map(Path::to_path_buf),
            source: self,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " (line {line}, column {column})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
