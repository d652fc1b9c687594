//! Storage layer (string-keyed blob stores).

pub mod blob_store;

pub use blob_store::{BlobStore, FileBlobStore, MemoryBlobStore, StorageError};

/// Storage key names as constants.
pub mod keys {
    /// Serialized workout collection
    pub const WORKOUTS: &str = "workouts";
}
