use crate::codec::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("Invalid scratch name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Malformed record: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to write record '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("No live buffer named '{0}'")]
    NotLive(String),
}

pub type Result<T> = std::result::Result<T, ScratchError>;
