pub mod health;
pub mod baskets;
pub mod features;
pub mod extract;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use crate::AppState;

pub use health::health_check;
pub use baskets::{
    create_basket_routes, MessageResponse, FETCH_BASKETS_FAILED_MESSAGE, PRICE_CHANGE_UPDATED_MESSAGE,
};
pub use features::create_feature_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", create_basket_routes().merge(create_feature_routes()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
