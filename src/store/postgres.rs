use async_trait::async_trait;
use sqlx::PgPool;

use super::{PinStore, StoreError};
use crate::models::{CanonicalPin, Pin};

const PIN_COLUMNS: &str =
    "pin_id, title, description, image_url, link, board, created_at, updated_at";

#[derive(Clone)]
pub struct PgPinStore {
    pool: PgPool,
}

impl PgPinStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PinStore for PgPinStore {
    async fn upsert(&self, pin: CanonicalPin) -> Result<Pin, StoreError> {
        // Row-level locking on the conflicting key serializes concurrent
        // upserts of the same pin; the last committed write wins whole.
        let row = sqlx::query_as::<_, Pin>(
            r#"
            INSERT INTO pins (pin_id, title, description, image_url, link, board, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (pin_id) DO UPDATE
            SET title       = EXCLUDED.title,
                description = EXCLUDED.description,
                image_url   = EXCLUDED.image_url,
                link        = EXCLUDED.link,
                board       = EXCLUDED.board,
                created_at  = EXCLUDED.created_at,
                updated_at  = NOW()
            RETURNING pin_id, title, description, image_url, link, board, created_at, updated_at
            "#,
        )
        .bind(&pin.pin_id)
        .bind(&pin.title)
        .bind(&pin.description)
        .bind(&pin.image_url)
        .bind(&pin.link)
        .bind(&pin.board)
        .bind(pin.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Pin>, StoreError> {
        let rows = sqlx::query_as::<_, Pin>(&format!(
            "SELECT {PIN_COLUMNS} FROM pins ORDER BY created_at DESC, pin_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, pin_id: &str) -> Result<Option<Pin>, StoreError> {
        let row = sqlx::query_as::<_, Pin>(&format!(
            "SELECT {PIN_COLUMNS} FROM pins WHERE pin_id = $1"
        ))
        .bind(pin_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::db::health_check(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
