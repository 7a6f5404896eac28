use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use crate::error::AppError;
use crate::models::{filter_and_order, FeatureRequest};

#[derive(Clone)]
pub struct FeatureService {
    db_pool: PgPool,
}

impl FeatureService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Open requests first, most voted first within each group.
    pub async fn list_features(&self, search: Option<&str>) -> Result<Vec<FeatureRequest>, AppError> {
        let features = sqlx::query_as::<_, FeatureRequest>(
            r#"
            SELECT id, title, description, votes, done
            FROM feature_requests
            ORDER BY votes DESC, title ASC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch feature requests: {}", e)))?;

        Ok(filter_and_order(features, search))
    }

    pub async fn vote(&self, feature_id: Uuid) -> Result<FeatureRequest, AppError> {
        let updated = sqlx::query_as::<_, FeatureRequest>(
            r#"
            UPDATE feature_requests
            SET votes = votes + 1
            WHERE id = $1 AND done = FALSE
            RETURNING id, title, description, votes, done
            "#,
        )
        .bind(feature_id)
        .fetch_optional(&self.db_pool)
        .await?;

        if let Some(feature) = updated {
            info!("Feature request {} now has {} votes", feature.id, feature.votes);
            return Ok(feature);
        }

        let done = sqlx::query_scalar::<_, bool>("SELECT done FROM feature_requests WHERE id = $1")
            .bind(feature_id)
            .fetch_optional(&self.db_pool)
            .await?;

        match done {
            Some(_) => Err(AppError::ValidationError(format!(
                "Feature request {} is already done",
                feature_id
            ))),
            None => Err(AppError::NotFound(format!("Feature request {} not found", feature_id))),
        }
    }
}
