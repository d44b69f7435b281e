//! File management module for filestash.
//!
//! This module provides:
//! - File, image and folder metadata with a parent hierarchy
//! - Validation of creation requests
//! - Blob storage with UUID naming
//! - The persistence service tying metadata and blobs together

mod collection;
mod metadata;
mod repository;
mod service;
mod storage;
mod validation;

pub use collection::FileCollection;
pub use metadata::{
    ChildQuery, FileChanges, FileDocument, FileId, FileQuery, FileType, NewFileDocument,
    ParentRef, PublicFile, UnknownFileType, PAGE_SIZE,
};
pub use repository::FileRepository;
pub use service::{decode_payload, to_public, FileStore};
pub use storage::{generate_blob_name, BlobWriter, FsBlobWriter};
pub use validation::{
    CreateFileRequest, FileValidator, ParentIdInput, ValidatedFile, ValidationError,
};

/// Default blob root.
pub const DEFAULT_STORAGE_PATH: &str = "/tmp/files_manager";
