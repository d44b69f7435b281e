//! File persistence service for filestash.
//!
//! [`FileStore`] turns validated requests into stored entries: the payload
//! goes to the blob area first, then the metadata row is inserted. A crash
//! between the two leaves an unreferenced blob behind.

use std::path::Path;
use std::sync::Arc;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, info, warn};

use super::collection::FileCollection;
use super::metadata::{
    ChildQuery, FileChanges, FileDocument, FileQuery, NewFileDocument, PublicFile,
};
use super::storage::{generate_blob_name, BlobWriter};
use super::validation::ValidatedFile;
use crate::db::UserId;
use crate::{FilestashError, Result};

/// Payload decoder: padding optional, trailing bits tolerated.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a base64 payload, ignoring ASCII whitespace such as line breaks.
pub fn decode_payload(data: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    PAYLOAD_ENGINE.decode(compact)
}

/// Strip internal fields from a stored entry.
pub fn to_public(doc: FileDocument) -> PublicFile {
    PublicFile::from(doc)
}

/// File persistence service.
#[derive(Clone)]
pub struct FileStore {
    files: Arc<dyn FileCollection>,
    blobs: Arc<dyn BlobWriter>,
}

impl FileStore {
    pub fn new(files: Arc<dyn FileCollection>, blobs: Arc<dyn BlobWriter>) -> Self {
        Self { files, blobs }
    }

    /// Persist a validated entry for `user_id`.
    ///
    /// Non-folder payloads are decoded and written to `blob_root/<uuid>`
    /// before the metadata insert. If the payload cannot be decoded or
    /// written, nothing is inserted and a `Storage` error is returned.
    pub async fn save(
        &self,
        user_id: UserId,
        file: ValidatedFile,
        blob_root: &Path,
    ) -> Result<PublicFile> {
        let mut doc = NewFileDocument::new(user_id, file.name, file.file_type)
            .with_public(file.is_public)
            .with_parent(file.parent_id);

        if file.file_type.has_payload() {
            let data = file.data.unwrap_or_default();
            let bytes = decode_payload(&data)
                .map_err(|e| FilestashError::Storage(format!("invalid payload: {e}")))?;

            let path = blob_root.join(generate_blob_name());
            self.blobs
                .create_dir_all(blob_root)
                .await
                .map_err(|e| storage_error(blob_root, e))?;
            self.blobs
                .write(&path, &bytes)
                .await
                .map_err(|e| storage_error(&path, e))?;

            debug!(path = %path.display(), size = bytes.len(), "Blob written");
            doc = doc.with_local_path(path.to_string_lossy());
        }

        let stored = self.files.insert_one(&doc).await?;

        info!(
            file_id = %stored.id,
            user_id = %user_id,
            file_type = %stored.file_type,
            "File entry created"
        );

        Ok(to_public(stored))
    }

    /// Point lookup.
    pub async fn get(&self, query: &FileQuery) -> Result<Option<PublicFile>> {
        Ok(self.files.find_one(query).await?.map(to_public))
    }

    /// Lazily stream the children matching `query`.
    pub fn list_children<'a>(&'a self, query: &ChildQuery) -> BoxStream<'a, Result<PublicFile>> {
        self.files
            .find_children(query)
            .map(|doc| doc.map(to_public))
            .boxed()
    }

    /// Apply a partial update and return the post-update entry.
    pub async fn update(
        &self,
        query: &FileQuery,
        changes: &FileChanges,
    ) -> Result<Option<PublicFile>> {
        let updated = self.files.find_one_and_update(query, changes).await?;

        match &updated {
            Some(doc) => info!(file_id = %doc.id, ?changes, "File entry updated"),
            None => debug!(?query, "Update matched no file entry"),
        }

        Ok(updated.map(to_public))
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> FilestashError {
    warn!(path = %path.display(), error = %e, "Blob storage failed");
    FilestashError::Storage(e.to_string())
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").finish()
    }
}
