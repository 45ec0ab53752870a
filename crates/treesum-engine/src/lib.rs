//! The treesum hashing engine.
//!
//! Computes git-compatible object ids for filesystem paths: files and
//! symlinks become blobs, directories become trees built bottom-up in
//! git's canonical entry order. All I/O is asynchronous; metadata lookups
//! go through a self-flushing [`StatCache`] and file-descriptor-holding
//! operations are bounded by two independent [`Gate`]s (one for directory
//! listings, one for blob content reads).
//!
//! The engine is read-only with respect to the filesystem and keeps no
//! state beyond the lifetime of a hashing call except the stat cache,
//! which expires on its own timer.
//!
//! ```no_run
//! # async fn demo() -> Result<(), treesum_engine::EngineError> {
//! let engine = treesum_engine::Engine::new();
//! let oid = engine.hash_any(std::path::Path::new("./src")).await?;
//! println!("{oid}");
//! # Ok(())
//! # }
//! ```

mod cache;
mod engine;
mod error;
mod gate;

pub use cache::StatCache;
pub use engine::{Engine, EngineOptions, METADATA_DIR};
pub use error::EngineError;
pub use gate::{Gate, Slot};

pub use treesum_hash::ObjectId;
