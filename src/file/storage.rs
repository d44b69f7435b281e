//! Blob storage for filestash.
//!
//! Payloads of non-folder entries are written as raw bytes under a flat
//! blob root, one file per entry:
//! ```text
//! {blob_root}/
//! ├── 3f1c2a9e-5b7d-4c1e-9a0f-8e2d6b4c7a11
//! └── 9d0e7b52-2a4f-4e8c-b1d3-6f5a8c2e9b40
//! ```
//! Names are random UUIDs unrelated to the entry ID and carry no extension.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use uuid::Uuid;

/// Directory creation and byte writes into the blob area.
#[async_trait]
pub trait BlobWriter: Send + Sync {
    /// Create `dir` and its parents. Must succeed if it already exists.
    async fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// Writes blobs to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsBlobWriter;

#[async_trait]
impl BlobWriter for FsBlobWriter {
    async fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(dir).await
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }
}

/// Generate a fresh blob name.
pub fn generate_blob_name() -> String {
    Uuid::new_v4().to_string()
}
