use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Raised by the rewriter itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("rewrite with `{rule}` did not converge within depth {limit}")]
    NonConvergence { rule: String, limit: usize },
}

/// Source text that could not be turned into a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at offset {offset})")]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the line being parsed
    pub offset: usize,
}

impl ParseError {
    pub fn new<S: Into<String>>(message: S, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Everything a caller of the engine or the session can be told about.
/// None of these end a session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("rule not found: `{0}`")]
    UnknownRule(String),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("no previous result to apply to")]
    NoPreviousResult,

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
