//! Object-model serialization for treesum.
//!
//! This crate produces the exact byte layouts git hashes: blob and tree
//! framing headers, octal file modes, and tree entries in git's canonical
//! sort order. It is serialization-only — treesum computes digests, it
//! never reads objects back.

pub mod header;
mod tree;

pub use tree::{base_name_compare, FileMode, Tree, TreeEntry};

/// Errors produced by object serialization.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("invalid file mode: {0:o}")]
    InvalidFileMode(u32),
}

/// The object kinds treesum emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
}

impl ObjectType {
    /// The canonical byte representation used in framing headers.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Blob => b"blob",
            Self::Tree => b"tree",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
        })
    }
}
