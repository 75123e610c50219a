use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("cannot find any scheme named {0}")]
    SchemeNotFound(String),

    #[error("cannot find any schemes in the project")]
    NoSchemes,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;
