//! Request DTOs for Web API.

use serde::Deserialize;

use crate::file::{FileId, ParentRef};

/// User registration request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Query string of the file listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Parent folder id, or `0` for the root.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Zero-based page, as sent.
    #[serde(default)]
    pub page: Option<String>,
}

impl ListFilesQuery {
    /// Parent to list. `None` when the id is not a valid file id.
    pub fn parent(&self) -> Option<ParentRef> {
        match self.parent_id.as_deref() {
            None | Some("") | Some(ParentRef::ROOT_STR) => Some(ParentRef::Root),
            Some(raw) => raw.parse::<FileId>().ok().map(ParentRef::Folder),
        }
    }

    /// Page to list: the leading digits of `page`, or 0 when there are none.
    pub fn page_number(&self) -> u32 {
        let raw = self.page.as_deref().unwrap_or("").trim_start();
        let end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        raw[..end].parse().unwrap_or(0)
    }
}
