//! SQLite-backed file entry collection.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::collection::FileCollection;
use super::metadata::{ChildQuery, FileChanges, FileDocument, FileId, FileQuery, NewFileDocument};
use crate::db::UserId;
use crate::{FilestashError, Result};

const COLUMNS: &str = "id, user_id, name, type AS file_type, is_public, parent_id, local_path";

/// Repository for file entries.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new FileRepository on the given pool.
    pub fn new(pool: &SqlitePool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Count entries owned by a user.
    pub async fn count_by_user(&self, user_id: UserId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &FileQuery) {
    builder.push(" WHERE 1=1");
    if let Some(id) = query.id {
        builder.push(" AND id = ").push_bind(id.to_string());
    }
    if let Some(user_id) = query.user_id {
        builder.push(" AND user_id = ").push_bind(user_id.to_string());
    }
    if let Some(parent_id) = query.parent_id {
        builder
            .push(" AND parent_id = ")
            .push_bind(parent_id.as_db_string());
    }
}

#[async_trait]
impl FileCollection for FileRepository {
    async fn find_one(&self, query: &FileQuery) -> Result<Option<FileDocument>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM files"));
        push_filters(&mut builder, query);
        builder.push(" ORDER BY rowid LIMIT 1");

        let doc = builder
            .build_query_as::<FileDocument>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }

    fn find_children<'a>(&'a self, query: &ChildQuery) -> BoxStream<'a, Result<FileDocument>> {
        let (limit, offset) = query.limit_offset().unwrap_or((-1, 0));

        sqlx::query_as::<_, FileDocument>(
            "SELECT id, user_id, name, type AS file_type, is_public, parent_id, local_path
             FROM files WHERE user_id = ? AND parent_id = ?
             ORDER BY rowid LIMIT ? OFFSET ?",
        )
        .bind(query.user_id.to_string())
        .bind(query.parent_id.as_db_string())
        .bind(limit)
        .bind(offset)
        .fetch(&self.pool)
        .map(|row| row.map_err(FilestashError::from))
        .boxed()
    }

    async fn insert_one(&self, doc: &NewFileDocument) -> Result<FileDocument> {
        let id = FileId::new();

        let stored = sqlx::query_as::<_, FileDocument>(&format!(
            "INSERT INTO files (id, user_id, name, type, is_public, parent_id, local_path)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(id.to_string())
        .bind(doc.user_id.to_string())
        .bind(&doc.name)
        .bind(doc.file_type.as_str())
        .bind(doc.is_public)
        .bind(doc.parent_id.as_db_string())
        .bind(&doc.local_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn find_one_and_update(
        &self,
        query: &FileQuery,
        changes: &FileChanges,
    ) -> Result<Option<FileDocument>> {
        let Some(is_public) = changes.is_public else {
            return self.find_one(query).await;
        };

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE files SET is_public = ");
        builder.push_bind(is_public);
        builder.push(" WHERE rowid = (SELECT rowid FROM files");
        push_filters(&mut builder, query);
        builder.push(" ORDER BY rowid LIMIT 1)");
        builder.push(format!(" RETURNING {COLUMNS}"));

        let doc = builder
            .build_query_as::<FileDocument>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc)
    }
}
