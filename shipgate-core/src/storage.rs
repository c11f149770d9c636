use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use crate::config::DatabaseCfg;
use crate::error::CoreResult;

/// Durably records one carrier's raw response, keyed by carrier id.
/// A failure here never rolls back the transport call already made; the
/// engine reports it in the job's outcome instead.
#[async_trait]
pub trait ShipmentStore: Send + Sync {
    async fn save(&self, carrier: &str, payload: &[u8]) -> CoreResult<()>;
}

/// Postgres-backed store: one row per persisted carrier response.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(cfg: &DatabaseCfg) -> CoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_millis(cfg.acquire_timeout_ms))
            .connect(&cfg.url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> CoreResult<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS shipment (
                id BIGSERIAL PRIMARY KEY,
                carrier TEXT NOT NULL,
                payload BYTEA NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn health_check(&self) -> CoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ShipmentStore for PgStore {
    async fn save(&self, carrier: &str, payload: &[u8]) -> CoreResult<()> {
        const QUERY: &str = "INSERT INTO shipment (carrier, payload) VALUES ($1, $2)";
        debug!(carrier, bytes = payload.len(), "saving shipment record");
        sqlx::query(QUERY)
            .bind(carrier)
            .bind(payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
