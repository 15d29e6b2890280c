//! PostgreSQL implementation for client storage

use crate::errors::StorageError;
use crate::registry::types::Client;
use crate::storage::is_table_exists_error;
use crate::storage::traits::{CLIENTS_TABLE, ClientStore, Result};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

/// PostgreSQL implementation of client storage
pub struct PostgresClientStore {
    pool: PgPool,
}

impl PostgresClientStore {
    /// Create a new PostgreSQL client store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_client(row: &PgRow) -> Result<Client> {
        let get = |column: &str| -> Result<String> {
            row.try_get(column).map_err(|e| {
                StorageError::DatabaseError(format!("Failed to get {}: {}", column, e))
            })
        };

        let public: bool = row
            .try_get("is_public")
            .map_err(|e| StorageError::DatabaseError(format!("Failed to get is_public: {}", e)))?;

        Ok(Client {
            id: get("id")?,
            name: get("name")?,
            secret: get("secret")?,
            redirect_uri: get("redirect_uri")?,
            grant_type: get("grant_type")?,
            response_type: get("response_type")?,
            scope: get("scope")?,
            public,
        })
    }
}

#[async_trait]
impl ClientStore for PostgresClientStore {
    async fn ensure_table(&self) -> Result<()> {
        let statement = format!(
            r#"
            CREATE TABLE {CLIENTS_TABLE} (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                secret TEXT NOT NULL,
                redirect_uri TEXT NOT NULL,
                grant_type TEXT NOT NULL,
                response_type TEXT NOT NULL,
                scope TEXT NOT NULL,
                is_public BOOLEAN NOT NULL
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
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                secret = EXCLUDED.secret,
                redirect_uri = EXCLUDED.redirect_uri,
                grant_type = EXCLUDED.grant_type,
                response_type = EXCLUDED.response_type,
                scope = EXCLUDED.scope,
                is_public = EXCLUDED.is_public
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
            .bind(client.public)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let statement = format!("SELECT * FROM {CLIENTS_TABLE} WHERE id = $1");
        let row = sqlx::query(&statement)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        row.as_ref().map(Self::row_to_client).transpose()
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let statement = format!("DELETE FROM {CLIENTS_TABLE} WHERE id = $1");
        sqlx::query(&statement)
            .bind(client_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}
