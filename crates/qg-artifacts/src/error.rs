use std::path::PathBuf;

use thiserror::Error;

/// Input-tier failures: the document could not be obtained as a whole.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InputError {
    pub fn is_missing(&self) -> bool {
        matches!(self, InputError::Missing { .. })
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            InputError::Missing { path } | InputError::Parse { path, .. } | InputError::Io { path, .. } => path,
        }
    }
}
