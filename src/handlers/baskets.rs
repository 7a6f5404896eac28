use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::{
    error::AppError,
    handlers::extract::{ApiJson, ApiPath, ApiQuery},
    models::{Basket, ChartPoint, CreateBasket, UpdateBasket},
    services::BasketService,
    utils::sort::{SortDirection, SortField, SortState},
    AppState,
};

pub const PRICE_CHANGE_UPDATED_MESSAGE: &str = "Basket prices change updated";
pub const FETCH_BASKETS_FAILED_MESSAGE: &str = "Error fetching baskets";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `sort`/`direction` give the current table sort. `toggle` names a clicked column header and
/// derives the next sort from the current one.
#[derive(Debug, Default, Deserialize)]
pub struct ListBasketsQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub toggle: Option<String>,
}

impl ListBasketsQuery {
    pub fn sort_state(&self) -> Result<SortState, AppError> {
        let current = self.current_sort()?;
        match &self.toggle {
            Some(clicked) => Ok(current.toggle(clicked.parse::<SortField>()?)),
            None => Ok(current),
        }
    }

    fn current_sort(&self) -> Result<SortState, AppError> {
        let field = match &self.sort {
            Some(field) => field.parse::<SortField>()?,
            None => SortField::default(),
        };
        let direction = match &self.direction {
            Some(direction) => direction.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };
        Ok(SortState::new(field, direction))
    }
}

/// GET /api/baskets
pub async fn list_baskets(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListBasketsQuery>,
) -> Result<Json<Vec<Basket>>, AppError> {
    let sort = query.sort_state()?;
    let service = BasketService::new(state.db_pool.clone());
    Ok(Json(service.list_baskets(sort).await?))
}

/// GET /api/baskets/{id}
pub async fn get_basket(
    State(state): State<AppState>,
    ApiPath(basket_id): ApiPath<Uuid>,
) -> Result<Json<Basket>, AppError> {
    let service = BasketService::new(state.db_pool.clone());
    Ok(Json(service.get_basket(basket_id).await?))
}

/// POST /api/baskets
pub async fn create_basket(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateBasket>,
) -> Result<(StatusCode, Json<Basket>), AppError> {
    let service = BasketService::new(state.db_pool.clone());
    let basket = service.create_basket(request).await?;
    Ok((StatusCode::CREATED, Json(basket)))
}

/// PUT /api/baskets/{id}
pub async fn update_basket(
    State(state): State<AppState>,
    ApiPath(basket_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateBasket>,
) -> Result<Json<Basket>, AppError> {
    let service = BasketService::new(state.db_pool.clone());
    Ok(Json(service.update_basket(basket_id, request).await?))
}

/// DELETE /api/baskets/{id}
pub async fn delete_basket(
    State(state): State<AppState>,
    ApiPath(basket_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let service = BasketService::new(state.db_pool.clone());
    service.delete_basket(basket_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/baskets/{id}/prices
pub async fn get_basket_prices(
    State(state): State<AppState>,
    ApiPath(basket_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ChartPoint>>, AppError> {
    let service = BasketService::new(state.db_pool.clone());
    Ok(Json(service.price_series(basket_id).await?))
}

/// GET /api/baskets/update-price-change
///
/// Succeeds once baskets are enumerated, however many individual updates were skipped.
pub async fn update_price_change(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .price_update_job
        .run()
        .await
        .map_err(|_| AppError::DatabaseError(FETCH_BASKETS_FAILED_MESSAGE.to_string()))?;

    Ok(Json(MessageResponse {
        message: PRICE_CHANGE_UPDATED_MESSAGE.to_string(),
    }))
}

pub fn create_basket_routes() -> Router<AppState> {
    Router::new()
        .route("/baskets", get(list_baskets).post(create_basket))
        .route("/baskets/update-price-change", get(update_price_change))
        .route("/baskets/:id", get(get_basket).put(update_basket).delete(delete_basket))
        .route("/baskets/:id/prices", get(get_basket_prices))
}
