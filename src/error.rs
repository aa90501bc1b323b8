use std::path::PathBuf;
use thiserror::Error;

/// Failures of the scan -> build -> splice pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error walking directory {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("could not find `{0}` in host file")]
    MissingMarker(&'static str),

    #[error("`// CHANNELS END` appears before `// CHANNELS BEGIN` in host file")]
    MarkersOutOfOrder,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
