//! Virtual file tree abstraction for the docsite engine.
//!
//! This crate provides a [`Storage`] trait for abstracting file enumeration and
//! content retrieval from the underlying backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between document loading logic and I/O operations
//!
//! # Virtual Paths
//!
//! All path parameters are **virtual paths**: forward-slash separated,
//! relative to the storage root (e.g., `"docs/guide/setup.md"`). Backends
//! map virtual paths to their internal representation.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docsite_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("content"));
//! for file in storage.list("docs")? {
//!     println!("{} ({})", file.virtual_path, file.extension);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{ErrorStatus, FileEntry, Storage, StorageError, StorageErrorKind};
