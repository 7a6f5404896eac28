use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use crate::{
    error::AppError,
    handlers::extract::{ApiJson, ApiQuery},
    models::{FeatureRequest, VoteRequest},
    services::FeatureService,
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListFeaturesQuery {
    pub search: Option<String>,
}

/// GET /api/features
pub async fn list_features(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListFeaturesQuery>,
) -> Result<Json<Vec<FeatureRequest>>, AppError> {
    let service = FeatureService::new(state.db_pool.clone());
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    Ok(Json(service.list_features(search).await?))
}

/// POST /api/features/vote
pub async fn vote_feature(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> Result<Json<FeatureRequest>, AppError> {
    let service = FeatureService::new(state.db_pool.clone());
    Ok(Json(service.vote(request.feature_id).await?))
}

pub fn create_feature_routes() -> Router<AppState> {
    Router::new()
        .route("/features", get(list_features))
        .route("/features/vote", post(vote_feature))
}
