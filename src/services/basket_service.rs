use sqlx::{types::Json, PgPool};
use tracing::info;
use uuid::Uuid;
use crate::error::AppError;
use crate::models::{Basket, ChartPoint, CreateBasket, PricePoint, UpdateBasket};
use crate::utils::sort::SortState;

const BASKET_COLUMNS: &str = "id, name, tokens, rebalance_interval, current_price, \
     price_1h_change, price_4h_change, price_24h_change, created_at";

/// Basket catalogue backed by Postgres.
#[derive(Clone)]
pub struct BasketService {
    db_pool: PgPool,
}

impl BasketService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn list_baskets(&self, sort: SortState) -> Result<Vec<Basket>, AppError> {
        let mut baskets = sqlx::query_as::<_, Basket>(&format!(
            "SELECT {} FROM baskets ORDER BY created_at ASC",
            BASKET_COLUMNS
        ))
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch baskets: {}", e)))?;

        sort.sort(&mut baskets);
        Ok(baskets)
    }

    pub async fn get_basket(&self, basket_id: Uuid) -> Result<Basket, AppError> {
        sqlx::query_as::<_, Basket>(&format!("SELECT {} FROM baskets WHERE id = $1", BASKET_COLUMNS))
            .bind(basket_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Basket {} not found", basket_id)))
    }

    pub async fn create_basket(&self, create: CreateBasket) -> Result<Basket, AppError> {
        create.validate()?;
        let basket = Basket::new(create);

        sqlx::query(
            r#"
            INSERT INTO baskets (
                id, name, tokens, rebalance_interval, current_price,
                price_1h_change, price_4h_change, price_24h_change, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(basket.id)
        .bind(&basket.name)
        .bind(Json(&basket.tokens))
        .bind(basket.rebalance_interval)
        .bind(basket.current_price)
        .bind(basket.price_1h_change)
        .bind(basket.price_4h_change)
        .bind(basket.price_24h_change)
        .bind(basket.created_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create basket: {}", e)))?;

        info!("Created basket {} ({}) with {} tokens", basket.id, basket.name, basket.tokens.len());
        Ok(basket)
    }

    /// Partial update of the user-owned fields. Derived price fields are never touched here.
    pub async fn update_basket(&self, basket_id: Uuid, update: UpdateBasket) -> Result<Basket, AppError> {
        update.validate()?;
        if update.is_empty() {
            return self.get_basket(basket_id).await;
        }

        sqlx::query_as::<_, Basket>(&format!(
            r#"
            UPDATE baskets
            SET name = COALESCE($2, name),
                tokens = COALESCE($3, tokens),
                rebalance_interval = COALESCE($4, rebalance_interval)
            WHERE id = $1
            RETURNING {}
            "#,
            BASKET_COLUMNS
        ))
        .bind(basket_id)
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.tokens.as_ref().map(Json))
        .bind(update.rebalance_interval)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Basket {} not found", basket_id)))
    }

    pub async fn delete_basket(&self, basket_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM baskets WHERE id = $1")
            .bind(basket_id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Basket {} not found", basket_id)));
        }
        info!("Deleted basket {}", basket_id);
        Ok(())
    }

    /// Price history in ascending time order, shaped for the chart.
    pub async fn price_series(&self, basket_id: Uuid) -> Result<Vec<ChartPoint>, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM baskets WHERE id = $1)")
            .bind(basket_id)
            .fetch_one(&self.db_pool)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Basket {} not found", basket_id)));
        }

        let points = sqlx::query_as::<_, PricePoint>(
            r#"
            SELECT price, timestamp FROM basket_prices
            WHERE basket_id = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(basket_id)
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch price series: {}", e)))?;

        Ok(points.into_iter().map(ChartPoint::from).collect())
    }
}
