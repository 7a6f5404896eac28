use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;
use crate::error::AppError;
use crate::models::{PriceChanges, PricePoint};

/// Data access needed by the price-change calculation.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Most recent price point for the basket, if any.
    async fn latest_price(&self, basket_id: Uuid) -> Result<Option<PricePoint>, AppError>;

    /// Full price history for the basket, newest first.
    async fn price_history(&self, basket_id: Uuid) -> Result<Vec<PricePoint>, AppError>;

    async fn list_basket_ids(&self) -> Result<Vec<Uuid>, AppError>;

    /// Overwrites the basket's derived price fields.
    async fn update_price_changes(&self, basket_id: Uuid, changes: &PriceChanges) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgPriceStore {
    db_pool: PgPool,
}

impl PgPriceStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PriceStore for PgPriceStore {
    async fn latest_price(&self, basket_id: Uuid) -> Result<Option<PricePoint>, AppError> {
        sqlx::query_as::<_, PricePoint>(
            r#"
            SELECT price, timestamp FROM basket_prices
            WHERE basket_id = $1
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(basket_id)
        .fetch_optional(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch latest price: {}", e)))
    }

    async fn price_history(&self, basket_id: Uuid) -> Result<Vec<PricePoint>, AppError> {
        sqlx::query_as::<_, PricePoint>(
            r#"
            SELECT price, timestamp FROM basket_prices
            WHERE basket_id = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(basket_id)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch price history: {}", e)))
    }

    async fn list_basket_ids(&self) -> Result<Vec<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM baskets")
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to fetch baskets: {}", e)))
    }

    async fn update_price_changes(&self, basket_id: Uuid, changes: &PriceChanges) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE baskets
            SET current_price = $2,
                price_1h_change = $3,
                price_4h_change = $4,
                price_24h_change = $5
            WHERE id = $1
            "#,
        )
        .bind(basket_id)
        .bind(changes.current_price)
        .bind(changes.price_1h_change)
        .bind(changes.price_4h_change)
        .bind(changes.price_24h_change)
        .execute(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update basket prices: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Basket {} not found", basket_id)));
        }
        Ok(())
    }
}
