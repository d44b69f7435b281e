//! File metadata types for filestash.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use crate::db::UserId;

/// Entries per page when listing children.
pub const PAGE_SIZE: u32 = 20;

/// Unique identifier of a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FileId(Uuid);

impl FileId {
    /// Generate a fresh random file ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for FileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl TryFrom<String> for FileId {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// An unrecognised `type` value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown file type: {0}")]
pub struct UnknownFileType(pub String);

/// Kind of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    File,
    Image,
    Folder,
}

impl FileType {
    /// Database and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::File => "file",
            FileType::Image => "image",
            FileType::Folder => "folder",
        }
    }

    /// Whether entries of this type carry a payload.
    pub fn has_payload(&self) -> bool {
        !matches!(self, FileType::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = UnknownFileType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(FileType::File),
            "image" => Ok(FileType::Image),
            "folder" => Ok(FileType::Folder),
            other => Err(UnknownFileType(other.to_string())),
        }
    }
}

impl TryFrom<String> for FileType {
    type Error = UnknownFileType;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Where an entry lives: the storage root or inside a folder.
///
/// Stored as `'0'` for the root. On the wire the root is the integer `0`
/// and a folder is its id string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    #[default]
    Root,
    Folder(FileId),
}

impl ParentRef {
    /// Stored form of the root.
    pub const ROOT_STR: &'static str = "0";

    /// Stored form of this reference.
    pub fn as_db_string(&self) -> String {
        match self {
            ParentRef::Root => Self::ROOT_STR.to_string(),
            ParentRef::Folder(id) => id.to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, ParentRef::Root)
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParentRef::Root => serializer.serialize_u8(0),
            ParentRef::Folder(id) => id.serialize(serializer),
        }
    }
}

impl TryFrom<String> for ParentRef {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == Self::ROOT_STR {
            Ok(ParentRef::Root)
        } else {
            s.parse().map(ParentRef::Folder)
        }
    }
}

/// A stored file entry, as kept in the document store.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FileDocument {
    #[sqlx(try_from = "String")]
    pub id: FileId,
    /// Owner.
    #[sqlx(try_from = "String")]
    pub user_id: UserId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub file_type: FileType,
    pub is_public: bool,
    #[sqlx(try_from = "String")]
    pub parent_id: ParentRef,
    /// Blob path; `None` for folders.
    pub local_path: Option<String>,
}

/// Data for creating a new file entry.
#[derive(Debug, Clone)]
pub struct NewFileDocument {
    pub user_id: UserId,
    pub name: String,
    pub file_type: FileType,
    pub is_public: bool,
    pub parent_id: ParentRef,
    pub local_path: Option<String>,
}

impl NewFileDocument {
    /// Create a private entry at the root.
    pub fn new(user_id: UserId, name: impl Into<String>, file_type: FileType) -> Self {
        Self {
            user_id,
            name: name.into(),
            file_type,
            is_public: false,
            parent_id: ParentRef::Root,
            local_path: None,
        }
    }

    /// Set the public flag.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: ParentRef) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Set the blob path.
    pub fn with_local_path(mut self, local_path: impl Into<String>) -> Self {
        self.local_path = Some(local_path.into());
        self
    }
}

/// Outbound shape of a file entry. Never carries the blob path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFile {
    pub id: FileId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub is_public: bool,
    pub parent_id: ParentRef,
}

impl From<FileDocument> for PublicFile {
    fn from(doc: FileDocument) -> Self {
        Self {
            id: doc.id,
            user_id: doc.user_id,
            name: doc.name,
            file_type: doc.file_type,
            is_public: doc.is_public,
            parent_id: doc.parent_id,
        }
    }
}

/// Equality query for a single entry. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileQuery {
    pub id: Option<FileId>,
    pub user_id: Option<UserId>,
    pub parent_id: Option<ParentRef>,
}

impl FileQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match by entry ID.
    pub fn id(mut self, id: FileId) -> Self {
        self.id = Some(id);
        self
    }

    /// Match by owner.
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Match by parent.
    pub fn parent_id(mut self, parent_id: ParentRef) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Query for the children of a folder (or the root) owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildQuery {
    pub user_id: UserId,
    pub parent_id: ParentRef,
    /// Zero-based page of [`PAGE_SIZE`] entries; `None` returns everything.
    pub page: Option<u32>,
}

impl ChildQuery {
    pub fn new(user_id: UserId, parent_id: ParentRef) -> Self {
        Self {
            user_id,
            parent_id,
            page: None,
        }
    }

    /// Restrict to one page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// `(limit, offset)` for the current page.
    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        self.page
            .map(|p| (i64::from(PAGE_SIZE), i64::from(p) * i64::from(PAGE_SIZE)))
    }
}

/// Partial update of a file entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileChanges {
    pub is_public: Option<bool>,
}

impl FileChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the public flag.
    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.is_public.is_none()
    }
}
