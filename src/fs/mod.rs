//! Remote filesystem contract and the backends that implement it.

mod entry;
pub mod memory;
pub mod webhdfs;

use thiserror::Error;

pub use entry::{Entry, EntryKind};
pub use memory::MemoryFs;
pub use webhdfs::{WebHdfsClient, WebHdfsConfig};

/// Result type for remote filesystem operations.
pub type FsResult<T> = Result<T, FsError>;

/// Failures reported by a remote filesystem backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0}: no such file or directory")]
    NotFound(String),
    #[error("{0}: permission denied")]
    PermissionDenied(String),
    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl FsError {
    /// The path the failing operation was issued against.
    pub fn path(&self) -> &str {
        match self {
            FsError::NotFound(path) | FsError::PermissionDenied(path) => path,
            FsError::Io { path, .. } => path,
        }
    }
}

/// Namenode-mediated filesystem as seen by the listing engine.
///
/// Every call is blocking and paths are absolute, slash-separated remote paths.
/// Implementations own any timeout or retry policy; callers issue one call at a time.
pub trait RemoteFs {
    /// Fetch the entry for a single path.
    fn stat(&self, path: &str) -> FsResult<Entry>;

    /// Fetch every child of a directory in one batch, in the backend's order.
    /// An empty directory yields an empty vector.
    fn list_dir(&self, path: &str) -> FsResult<Vec<Entry>>;

    /// Absolute path of the current user's home directory.
    fn home_dir(&self) -> FsResult<String>;
}
