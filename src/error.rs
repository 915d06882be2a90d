use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which side of a span a timestamp belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Why an elapsed time is unavailable.
///
/// Both variants surface as the `-1` sentinel on the tracker's display
/// accessors; this type keeps the cause for callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElapsedError {
    #[error("{endpoint} time {value:?} is not a valid yyyy-MM-dd HH:mm timestamp")]
    ParseFailure { endpoint: Endpoint, value: String },

    #[error("end time {end} precedes start time {start}")]
    NegativeSpan { start: String, end: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no home directory found; set PT_HOME to choose a working directory")]
    NoHomeDir,

    #[error("failed to create working directory {path}: {source}")]
    WorkingDirectory { path: PathBuf, source: io::Error },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("no entry with id {0}")]
    EntryNotFound(i64),

    #[error("{0:?} is not a valid entry id")]
    InvalidId(String),

    #[error(transparent)]
    Elapsed(#[from] ElapsedError),
}

pub type Result<T> = std::result::Result<T, Error>;
