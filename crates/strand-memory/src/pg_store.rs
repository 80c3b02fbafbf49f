//! Postgres + pgvector backend.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use pgvector::Vector;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::vector_store::{ScoredPoint, VectorPoint, VectorStore, VectorStoreError};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Vector store backed by a Postgres table per collection, with the
/// `vector` extension providing cosine-distance search.
#[derive(Debug, Clone)]
pub struct PgVectorStore {
    pool: PgPool,
}

impl PgVectorStore {
    /// Connect to Postgres at `url` (a `postgres://…` connection string).
    ///
    /// # Errors
    ///
    /// Returns [`VectorStoreError::Connection`] when the pool cannot be
    /// established.
    pub async fn connect(url: &str) -> Result<Self, VectorStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| VectorStoreError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Collection names become table names, so they must be plain identifiers.
fn validate_collection(name: &str) -> Result<(), VectorStoreError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && name.len() <= 63
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(VectorStoreError::InvalidCollection(name.to_owned()))
    }
}

fn row_to_scored(row: &sqlx::postgres::PgRow) -> Result<ScoredPoint, VectorStoreError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| VectorStoreError::Search(e.to_string()))?;
    let score: f64 = row
        .try_get("score")
        .map_err(|e| VectorStoreError::Search(e.to_string()))?;
    let payload: sqlx::types::Json<HashMap<String, serde_json::Value>> = row
        .try_get("payload")
        .map_err(|e| VectorStoreError::Search(e.to_string()))?;

    #[allow(clippy::cast_possible_truncation)]
    Ok(ScoredPoint {
        id,
        score: score as f32,
        payload: payload.0,
    })
}

impl VectorStore for PgVectorStore {
    fn ensure_collection(
        &self,
        collection: &str,
        vector_size: u64,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            validate_collection(&collection)?;

            sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
                .execute(&self.pool)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;

            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS \"{collection}\" (\
                 id TEXT PRIMARY KEY, \
                 payload JSONB NOT NULL DEFAULT '{{}}'::jsonb, \
                 embedding vector({vector_size}) NOT NULL)"
            );
            sqlx::query(&ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            Ok(())
        })
    }

    fn upsert(
        &self,
        collection: &str,
        points: Vec<VectorPoint>,
    ) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            validate_collection(&collection)?;

            let sql = format!(
                "INSERT INTO \"{collection}\" (id, payload, embedding) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (id) DO UPDATE SET \
                 payload = EXCLUDED.payload, embedding = EXCLUDED.embedding"
            );

            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            for point in points {
                sqlx::query(&sql)
                    .bind(&point.id)
                    .bind(sqlx::types::Json(&point.payload))
                    .bind(Vector::from(point.vector.clone()))
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            }
            tx.commit()
                .await
                .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            Ok(())
        })
    }

    fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<ScoredPoint>, VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            validate_collection(&collection)?;

            let sql = format!(
                "SELECT id, payload, 1 - (embedding <=> $1) AS score \
                 FROM \"{collection}\" \
                 ORDER BY embedding <=> $1 \
                 LIMIT $2"
            );
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let rows = sqlx::query(&sql)
                .bind(Vector::from(vector))
                .bind(limit)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| VectorStoreError::Search(e.to_string()))?;

            rows.iter().map(row_to_scored).collect()
        })
    }

    fn delete_collection(&self, collection: &str) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        let collection = collection.to_owned();
        Box::pin(async move {
            validate_collection(&collection)?;

            let ddl = format!("DROP TABLE IF EXISTS \"{collection}\"");
            sqlx::query(&ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| VectorStoreError::Delete(e.to_string()))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers_accepted() {
        assert!(validate_collection("documents").is_ok());
        assert!(validate_collection("_private").is_ok());
        assert!(validate_collection("col_2024").is_ok());
    }

    #[test]
    fn injection_shaped_names_rejected() {
        assert!(validate_collection("").is_err());
        assert!(validate_collection("docs; DROP TABLE users").is_err());
        assert!(validate_collection("docs\"").is_err());
        assert!(validate_collection("2024col").is_err());
        assert!(validate_collection("col name").is_err());
    }

    #[test]
    fn overlong_names_rejected() {
        let name = "a".repeat(64);
        assert!(validate_collection(&name).is_err());
        let name = "a".repeat(63);
        assert!(validate_collection(&name).is_ok());
    }
}
