use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode entries: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to encode config: {0}")]
    Config(#[from] toml::ser::Error),

    #[error("invalid day key `{0}`")]
    InvalidDayKey(String),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
