use std::path::PathBuf;

use treesum_hash::HashError;

/// Errors produced by the hashing engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The path is not a regular file, executable file, symlink, or
    /// directory (device, socket, FIFO, ...). Always fatal.
    #[error("cannot hash '{}': not a file, directory, or symlink", path.display())]
    Unhashable { path: PathBuf },

    /// A directory has no hashable children after exclusions.
    ///
    /// This is a structural signal rather than a generic fault: a parent
    /// directory catches it and omits the child entry (git never
    /// represents empty directories), while at the top level it surfaces
    /// to the caller unchanged.
    #[error("directory '{}' has no hashable entries", path.display())]
    EmptyDirectory { path: PathBuf },

    /// Filesystem I/O failure. Fatal, never retried.
    #[error("{op} '{}': {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Hash(#[from] HashError),
}

impl EngineError {
    pub(crate) fn io(op: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_owned(),
            source,
        }
    }

    /// Whether this is the structural empty-directory condition.
    pub fn is_empty_directory(&self) -> bool {
        matches!(self, Self::EmptyDirectory { .. })
    }
}
