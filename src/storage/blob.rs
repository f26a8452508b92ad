//!  Blob reads.
//!
//! blobs are the content of files. The virtual filesystem never writes them;
//! it only needs their size for listings and their bytes for read streams.

use crate::storage::error::StorageResult;
pub(crate) use crate::storage::types::BlobId;

/// read a blob's content from the repository
pub fn read_blob(repo: &git2::Repository, blob_id: BlobId) -> StorageResult<Vec<u8>> {
    let blob = repo.find_blob(blob_id.raw())?;
    Ok(blob.content().to_vec())
}

/// metadata about a blob without reading its full content
#[derive(Debug, Clone)]
pub struct BlobMetadata {
    pub id: BlobId,
    pub size: usize,
}

impl BlobMetadata {
    /// get the metadata for a blob
    pub fn from_blob(blob: &git2::Blob<'_>) -> Self {
        Self {
            id: BlobId::new(blob.id()),
            size: blob.size(),
        }
    }
}
