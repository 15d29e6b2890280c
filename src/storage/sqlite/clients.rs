//! SQLite implementation for client storage

use crate::errors::StorageError;
use crate::registry::types::Client;
use crate::storage::is_table_exists_error;
use crate::storage::traits::{CLIENTS_TABLE, ClientStore, Result};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

/// SQLite implementation of client storage
pub struct SqliteClientStore {
    pool: SqlitePool,
}

impl SqliteClientStore {
    /// Create a new SQLite client store
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Convert SQLite row to Client
    fn row_to_client(row: &SqliteRow) -> Result<Client> {
        let id: String = row
            .try_get("id")
            .map_err(|e| StorageError::DatabaseError(format!("Failed to get id: {}", e)))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| StorageError::DatabaseError(format!("Failed to get name: {}", e)))?;
        let secret: String = row
            .try_get("secret")
            .map_err(|e| StorageError::DatabaseError(format!("Failed to get secret: {}", e)))?;
        let redirect_uri: String = row.try_get("redirect_uri").map_err(|e| {
            StorageError::DatabaseError(format!("Failed to get redirect_uri: {}", e))
        })?;
        let grant_type: String = row.try_get("grant_type").map_err(|e| {
            StorageError::DatabaseError(format!("Failed to get grant_type: {}", e))
        })?;
        let response_type: String = row.try_get("response_type").map_err(|e| {
            StorageError::DatabaseError(format!("Failed to get response_type: {}", e))
        })?;
        let scope: String = row
            .try_get("scope")
            .map_err(|e| StorageError::DatabaseError(format!("Failed to get scope: {}", e)))?;
        let is_public: i64 = row
            .try_get("is_public")
            .map_err(|e| StorageError::DatabaseError(format!("Failed to get is_public: {}", e)))?;

        Ok(Client {
            id,
            name,
            secret,
            redirect_uri,
            grant_type,
            response_type,
            scope,
            public: is_public != 0,
        })
    }
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    async fn ensure_table(&self) -> Result<()> {
        let statement = format!(
            r#"
            CREATE TABLE {CLIENTS_TABLE} (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                secret TEXT NOT NULL,
                redirect_uri TEXT NOT NULL,
                grant_type TEXT NOT NULL,
                response_type TEXT NOT NULL,
                scope TEXT NOT NULL,
                is_public INTEGER NOT NULL
            )
            "#
        );

        match sqlx::query(&statement).execute(&self.pool).await {
            Ok(_) => {
                tracing::info!(table = CLIENTS_TABLE, "created table");
                Ok(())
            }
            Err(e) if is_table_exists_error(&e) => {
                tracing::info!(table = CLIENTS_TABLE, "table already exists");
                Ok(())
            }
            Err(e) => Err(StorageError::ProvisioningFailed(e.to_string())),
        }
    }

    async fn put_client(&self, client: &Client) -> Result<()> {
        let statement = format!(
            r#"
            INSERT INTO {CLIENTS_TABLE} (
                id, name, secret, redirect_uri, grant_type, response_type, scope, is_public
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                secret = excluded.secret,
                redirect_uri = excluded.redirect_uri,
                grant_type = excluded.grant_type,
                response_type = excluded.response_type,
                scope = excluded.scope,
                is_public = excluded.is_public
            "#
        );

        sqlx::query(&statement)
            .bind(&client.id)
            .bind(&client.name)
            .bind(&client.secret)
            .bind(&client.redirect_uri)
            .bind(&client.grant_type)
            .bind(&client.response_type)
            .bind(&client.scope)
            .bind(if client.public { 1i64 } else { 0i64 })
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let statement = format!("SELECT * FROM {CLIENTS_TABLE} WHERE id = ?");
        let row = sqlx::query(&statement)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        row.as_ref().map(Self::row_to_client).transpose()
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let statement = format!("DELETE FROM {CLIENTS_TABLE} WHERE id = ?");
        sqlx::query(&statement)
            .bind(client_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
