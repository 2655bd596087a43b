/**
 * Document Store
 *
 * Products and baskets are schemaless JSON documents kept in the `documents`
 * table, keyed by `(collection, id)`. Ids are UUID strings generated on
 * insert. A `Collection<T>` is a typed view over one collection name.
 */

use std::marker::PhantomData;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::StoreError;
use crate::shared::models::{Document, DocumentUpdate};

/// Handle to the document table
#[derive(Clone, Debug)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Typed view over the collection `name`
    pub fn collection<T>(&self, name: &'static str) -> Collection<T> {
        Collection {
            pool: self.pool.clone(),
            name,
            _marker: PhantomData,
        }
    }
}

/// Typed collection of documents
pub struct Collection<T> {
    pool: SqlitePool,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Store `body` under a fresh id
    pub async fn insert(&self, body: T) -> Result<Document<T>, StoreError> {
        let id = Uuid::new_v4().to_string();
        let json = serde_json::to_string(&body)?;

        sqlx::query("INSERT INTO documents (collection, id, body, created_at) VALUES (?, ?, ?, ?)")
            .bind(self.name)
            .bind(&id)
            .bind(json)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(Document { id, body })
    }

    /// All documents in insertion order
    pub async fn list(&self) -> Result<Vec<Document<T>>, StoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT id, body FROM documents WHERE collection = ? ORDER BY created_at, rowid",
        )
        .bind(self.name)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|(id, body)| decode(id, &body)).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document<T>>, StoreError> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT id, body FROM documents WHERE collection = ? AND id = ?")
                .bind(self.name)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(id, body)| decode(id, &body)).transpose()
    }

    /// Apply a partial update
    ///
    /// # Returns
    /// False if the update is empty or no document has this id
    pub async fn update<U>(&self, id: &str, update: U) -> Result<bool, StoreError>
    where
        U: DocumentUpdate<T>,
    {
        if update.is_empty() {
            return Ok(false);
        }
        let Some(mut document) = self.get(id).await? else {
            return Ok(false);
        };
        update.apply_to(&mut document.body);

        let result = sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(serde_json::to_string(&document.body)?)
            .bind(self.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// # Returns
    /// True if a document was deleted
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(self.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn decode<T: DeserializeOwned>(id: String, body: &str) -> Result<Document<T>, StoreError> {
    Ok(Document {
        id,
        body: serde_json::from_str(body)?,
    })
}
