//! Hash computation and object identity for treesum.
//!
//! This crate provides the core `ObjectId` type (a 20-byte SHA-1 digest,
//! the only algorithm treesum speaks), hex encoding/decoding, and the
//! streaming `Hasher` used to digest framed object content.

mod error;
pub mod hex;
mod oid;
pub mod hasher;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
