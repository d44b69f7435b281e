//! Validation of file creation requests.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use super::collection::FileCollection;
use super::metadata::{FileId, FileQuery, FileType, ParentRef};
use crate::Result;

/// Why a creation request was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing name")]
    MissingName,

    /// `type` is absent or not one of file, image, folder.
    #[error("Missing type")]
    MissingType,

    /// A file or image without a payload.
    #[error("Missing data")]
    MissingData,

    #[error("Parent not found")]
    ParentNotFound,

    #[error("Parent is not a folder")]
    ParentNotAFolder,
}

/// `parentId` as sent by clients: `0`, `"0"` or an id string.
///
/// Anything else lands in `Other` and never names an existing folder,
/// except a numeric zero such as `0.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParentIdInput {
    Number(i64),
    Text(String),
    Other(Value),
}

/// Body of a file creation request.
///
/// Fields are read leniently so that one odd field never hides the
/// others from validation: a non-string `name`, `type` or `data` counts
/// as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub file_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_public: bool,
    /// Base64 payload.
    #[serde(default, deserialize_with = "lenient_string")]
    pub data: Option<String>,
    pub parent_id: Option<ParentIdInput>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// `null` and unrecognised values are false; `"true"` and non-zero
/// numbers are true.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFile {
    pub name: String,
    pub file_type: FileType,
    pub is_public: bool,
    pub parent_id: ParentRef,
    /// Base64 payload; always present unless `file_type` is a folder.
    pub data: Option<String>,
}

enum ParentLookup {
    Root,
    Invalid,
    Id(FileId),
}

fn classify_parent(input: Option<&ParentIdInput>) -> ParentLookup {
    match input {
        None | Some(ParentIdInput::Number(0)) => ParentLookup::Root,
        Some(ParentIdInput::Number(_)) => ParentLookup::Invalid,
        Some(ParentIdInput::Text(s)) if s == ParentRef::ROOT_STR => ParentLookup::Root,
        Some(ParentIdInput::Text(s)) => match s.parse() {
            Ok(id) => ParentLookup::Id(id),
            Err(_) => ParentLookup::Invalid,
        },
        Some(ParentIdInput::Other(v)) if v.as_f64() == Some(0.0) => ParentLookup::Root,
        Some(ParentIdInput::Other(_)) => ParentLookup::Invalid,
    }
}

/// Validates creation requests against the stored hierarchy.
///
/// Performs reads only.
#[derive(Clone)]
pub struct FileValidator {
    files: Arc<dyn FileCollection>,
}

impl FileValidator {
    pub fn new(files: Arc<dyn FileCollection>) -> Self {
        Self { files }
    }

    /// Validate `request`; the first failing rule wins.
    ///
    /// The outer `Result` carries document store failures, the inner one
    /// the verdict.
    pub async fn check(
        &self,
        request: &CreateFileRequest,
    ) -> Result<std::result::Result<ValidatedFile, ValidationError>> {
        let Some(name) = request.name.as_deref().filter(|n| !n.is_empty()) else {
            return Ok(Err(ValidationError::MissingName));
        };

        let Some(file_type) = request
            .file_type
            .as_deref()
            .and_then(|t| t.parse::<FileType>().ok())
        else {
            return Ok(Err(ValidationError::MissingType));
        };

        let has_data = request.data.as_deref().is_some_and(|d| !d.is_empty());
        if !has_data && file_type.has_payload() {
            return Ok(Err(ValidationError::MissingData));
        }

        let parent_id = match classify_parent(request.parent_id.as_ref()) {
            ParentLookup::Root => ParentRef::Root,
            ParentLookup::Invalid => return Ok(Err(ValidationError::ParentNotFound)),
            ParentLookup::Id(id) => {
                let Some(parent) = self.files.find_one(&FileQuery::new().id(id)).await? else {
                    return Ok(Err(ValidationError::ParentNotFound));
                };
                if parent.file_type != FileType::Folder {
                    return Ok(Err(ValidationError::ParentNotAFolder));
                }
                ParentRef::Folder(id)
            }
        };

        Ok(Ok(ValidatedFile {
            name: name.to_string(),
            file_type,
            is_public: request.is_public,
            parent_id,
            data: if file_type.has_payload() {
                request.data.clone()
            } else {
                None
            },
        }))
    }

    /// Validate `request`, folding a rejection into the crate error.
    pub async fn validate(&self, request: &CreateFileRequest) -> Result<ValidatedFile> {
        Ok(self.check(request).await??)
    }
}

impl std::fmt::Debug for FileValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileValidator").finish()
    }
}
