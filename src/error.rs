use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while handling a command or touching the data file.
///
/// Every variant is recoverable: the read loop reports the message and keeps going.
#[derive(Debug, Error)]
pub enum LeoError {
    /// The command text itself is malformed.
    #[error("{0}")]
    Parse(String),
    /// The command parsed fine but makes no sense against the current list.
    #[error("{0}")]
    Validation(String),
    /// An equivalent task is already in the list.
    #[error("This task already exists in your list: {0}")]
    Duplicate(String),
    /// Raw list access outside `0..len`.
    #[error("Task index {index} is out of range (list has {len} tasks).")]
    IndexOutOfRange { index: usize, len: usize },
    /// A structurally complete record holds a value that cannot be decoded.
    #[error("Corrupted data in save file: {0}")]
    CorruptedData(String),
    /// The data file could not be read or written.
    #[error("Cannot access save file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LeoError {
    pub fn parse(msg: impl Into<String>) -> Self {
        LeoError::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        LeoError::Validation(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LeoError::Io { path: path.into(), source }
    }
}

pub type LeoResult<T> = Result<T, LeoError>;
