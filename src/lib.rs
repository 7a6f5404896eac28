pub mod config;
pub mod models;
pub mod services;
pub mod handlers;
pub mod database;
pub mod utils;
pub mod error;

pub use error::types::*;

use std::sync::Arc;
use sqlx::PgPool;
use crate::services::PriceUpdateJob;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub price_update_job: Arc<PriceUpdateJob>,
}
