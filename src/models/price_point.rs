use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

/// One sample from a basket's append-only price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PricePoint {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self { price, timestamp }
    }
}

/// Chart series entry, serialized as `{ "time": "<RFC 3339>", "value": .. }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl From<PricePoint> for ChartPoint {
    fn from(point: PricePoint) -> Self {
        Self {
            time: point.timestamp,
            value: point.price,
        }
    }
}
