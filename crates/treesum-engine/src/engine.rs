use std::ffi::{OsStr, OsString};
use std::fs::Metadata;
use std::path::Path;
use std::time::Duration;

use bstr::BString;
use futures::future::{join_all, BoxFuture};
use tokio::io::AsyncReadExt;

use treesum_hash::{Hasher, ObjectId};
use treesum_object::{base_name_compare, header, FileMode, ObjectType, Tree, TreeEntry};

use crate::{EngineError, Gate, StatCache};

/// Directory name excluded from every listing (exact, case-sensitive
/// match at each directory level — not a recursive path rule).
pub const METADATA_DIR: &str = ".git";

/// Read buffer size for streaming blob content into the hasher.
const READ_CHUNK: usize = 64 * 1024;

/// Tunables for an [`Engine`].
///
/// The slot counts bound open file descriptors; changing them affects
/// timing only, never a computed id.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Concurrent directory listings (default 100).
    pub tree_slots: usize,
    /// Concurrent blob reads (default 100).
    pub blob_slots: usize,
    /// Stat cache flush interval (default 1 s).
    pub stat_flush: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tree_slots: 100,
            blob_slots: 100,
            stat_flush: StatCache::DEFAULT_FLUSH,
        }
    }
}

/// The hashing engine.
///
/// Owns its stat cache and concurrency gates explicitly; nothing here is
/// process-global. All state is scoped to the engine's lifetime, and the
/// engine never mutates the filesystem.
///
/// Must be created inside a tokio runtime (the stat cache spawns its
/// flush task on construction).
pub struct Engine {
    stats: StatCache,
    tree_gate: Gate,
    blob_gate: Gate,
}

impl Engine {
    /// Engine with default options.
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Engine with explicit concurrency caps and cache flush interval.
    pub fn with_options(opts: EngineOptions) -> Self {
        Self {
            stats: StatCache::new(opts.stat_flush),
            tree_gate: Gate::new(opts.tree_slots),
            blob_gate: Gate::new(opts.blob_slots),
        }
    }

    /// Hash whatever `path` points at.
    ///
    /// Symlinks hash as blobs of their target text (never dereferenced,
    /// even when they point at directories), directories as trees, files
    /// as blobs. Anything else is [`EngineError::Unhashable`]. This is
    /// the public entry point and the sole recursion point for tree
    /// children; it returns a boxed future so the recursion through
    /// [`hash_tree`](Engine::hash_tree) type-checks.
    pub fn hash_any<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, Result<ObjectId, EngineError>> {
        Box::pin(async move {
            let md = self.stats.stat(path).await?;
            let ft = md.file_type();
            if ft.is_symlink() {
                self.hash_link(path).await
            } else if ft.is_dir() {
                self.hash_tree(path).await
            } else if ft.is_file() {
                self.hash_file(path).await
            } else {
                Err(EngineError::Unhashable {
                    path: path.to_owned(),
                })
            }
        })
    }

    /// Hash a regular file as a blob: `"blob <len>\0"` followed by the
    /// raw content, streamed through the hasher chunk by chunk.
    ///
    /// The length in the header comes from the stat cache, which is what
    /// lets the content stream instead of buffering.
    pub async fn hash_file(&self, path: &Path) -> Result<ObjectId, EngineError> {
        let len = self.stats.stat(path).await?.len();
        // The slot covers the open file handle.
        let _slot = self.blob_gate.admit().await;

        let mut hasher = Hasher::new();
        hasher.update(&header::write_header(ObjectType::Blob, len));

        let mut file = tokio::fs::File::open(path)
            .await
            .map_err(|e| EngineError::io("open", path, e))?;
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = file
                .read(&mut buf)
                .await
                .map_err(|e| EngineError::io("read", path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize()?)
    }

    /// Hash a symlink as a blob of its target text.
    ///
    /// The framed length is the byte length of the target string itself,
    /// so a dangling link hashes the same as a live one.
    pub async fn hash_link(&self, path: &Path) -> Result<ObjectId, EngineError> {
        let _slot = self.blob_gate.admit().await;

        let target = tokio::fs::read_link(path)
            .await
            .map_err(|e| EngineError::io("readlink", path, e))?;
        let bytes = target.as_os_str().as_encoded_bytes();

        let mut hasher = Hasher::new();
        hasher.update(&header::write_header(ObjectType::Blob, bytes.len() as u64));
        hasher.update(bytes);
        Ok(hasher.finalize()?)
    }

    /// Hash a directory as a tree object.
    ///
    /// Children are hashed concurrently but assembled strictly in git's
    /// canonical sort order; the digest is byte-order sensitive. A child
    /// directory that turns out empty (or collapses to nothing) is
    /// omitted, matching git, which never records empty directories. If
    /// *this* directory ends up with no entries the call fails with
    /// [`EngineError::EmptyDirectory`] — the omission only ever happens
    /// one level up, in the parent's entry loop.
    pub async fn hash_tree(&self, path: &Path) -> Result<ObjectId, EngineError> {
        let names = self.list_dir(path).await?;
        if names.is_empty() {
            return Err(EngineError::EmptyDirectory {
                path: path.to_owned(),
            });
        }

        // lstat every child once (cached): the kind decides the sort
        // position now and the encoded mode later.
        let mut children = Vec::with_capacity(names.len());
        for name in names {
            let child = path.join(&name);
            let md = self.stats.stat(&child).await?;
            let mode = entry_mode(&md).ok_or_else(|| EngineError::Unhashable {
                path: child.clone(),
            })?;
            children.push((name, mode, child));
        }
        children.sort_by(|a, b| {
            base_name_compare(
                a.0.as_encoded_bytes(),
                a.1.is_tree(),
                b.0.as_encoded_bytes(),
                b.1.is_tree(),
            )
        });

        // join_all keeps results in sorted index order no matter which
        // child finishes first.
        let digests = join_all(children.iter().map(|(_, _, child)| self.hash_any(child))).await;

        let mut tree = Tree::new();
        for ((name, mode, _), digest) in children.iter().zip(digests) {
            match digest {
                Ok(oid) => tree.push(TreeEntry {
                    mode: *mode,
                    name: BString::from(name.as_encoded_bytes().to_vec()),
                    oid,
                }),
                Err(e) if e.is_empty_directory() => continue,
                Err(e) => return Err(e),
            }
        }
        if tree.is_empty() {
            return Err(EngineError::EmptyDirectory {
                path: path.to_owned(),
            });
        }

        let content = tree.serialize_content();
        let mut hasher = Hasher::new();
        hasher.update(&header::write_header(ObjectType::Tree, content.len() as u64));
        hasher.update(&content);
        Ok(hasher.finalize()?)
    }

    /// Produce the raw encoded tree entry for one named child of `dir`,
    /// including recursively hashing that child. Diagnostic counterpart
    /// of [`hash_tree`](Engine::hash_tree); an empty child directory
    /// propagates as an error here since there is no parent entry list
    /// to omit it from.
    pub async fn tree_entry(&self, dir: &Path, name: &OsStr) -> Result<Vec<u8>, EngineError> {
        let child = dir.join(name);
        let md = self.stats.stat(&child).await?;
        let mode = entry_mode(&md).ok_or_else(|| EngineError::Unhashable {
            path: child.clone(),
        })?;
        let oid = self.hash_any(&child).await?;
        let entry = TreeEntry {
            mode,
            name: BString::from(name.as_encoded_bytes().to_vec()),
            oid,
        };
        Ok(entry.to_bytes())
    }

    /// List a directory's names, minus the metadata directory.
    async fn list_dir(&self, path: &Path) -> Result<Vec<OsString>, EngineError> {
        // The slot covers the open directory handle.
        let _slot = self.tree_gate.admit().await;

        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| EngineError::io("list", path, e))?;
        let mut names = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| EngineError::io("list", path, e))?
        {
            let name = entry.file_name();
            if name.as_os_str() == OsStr::new(METADATA_DIR) {
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Map lstat metadata to the entry's encoded mode, or `None` for kinds
/// the object model cannot represent.
fn entry_mode(md: &Metadata) -> Option<FileMode> {
    let ft = md.file_type();
    if ft.is_symlink() {
        Some(FileMode::Symlink)
    } else if ft.is_dir() {
        Some(FileMode::Tree)
    } else if ft.is_file() {
        if is_executable(md) {
            Some(FileMode::Executable)
        } else {
            Some(FileMode::Regular)
        }
    } else {
        None
    }
}

/// Owner-execute bit decides 755 vs 644, matching git's normalization.
#[cfg(unix)]
fn is_executable(md: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_md: &Metadata) -> bool {
    false
}
