//! Document store collaborator for file entries.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::metadata::{ChildQuery, FileChanges, FileDocument, FileQuery, NewFileDocument};
use crate::Result;

/// Find/insert/update access to stored file entries.
///
/// Implementations must make each single-document insert and update atomic.
#[async_trait]
pub trait FileCollection: Send + Sync {
    /// First entry matching `query`, in insertion order.
    async fn find_one(&self, query: &FileQuery) -> Result<Option<FileDocument>>;

    /// Lazily stream the entries matching `query`, in insertion order.
    fn find_children<'a>(&'a self, query: &ChildQuery) -> BoxStream<'a, Result<FileDocument>>;

    /// Store a new entry and return it with its assigned ID.
    async fn insert_one(&self, doc: &NewFileDocument) -> Result<FileDocument>;

    /// Apply `changes` to the first entry matching `query` and return the
    /// post-update document.
    async fn find_one_and_update(
        &self,
        query: &FileQuery,
        changes: &FileChanges,
    ) -> Result<Option<FileDocument>>;
}
