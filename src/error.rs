use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single input document was left out of the report
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unreadable file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::Read { path, .. } | DocumentError::Parse { path, .. } => path,
        }
    }
}
