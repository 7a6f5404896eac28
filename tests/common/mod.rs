#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;
use basketfi::{
    error::AppError,
    models::{PriceChanges, PricePoint},
    services::PriceStore,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 12, 0, 0).unwrap()
}

pub fn point_at(now: DateTime<Utc>, price: f64, age: Duration) -> PricePoint {
    PricePoint::new(price, now - age)
}

pub const UNPRICED: PriceChanges = PriceChanges {
    current_price: 0.0,
    price_1h_change: 0.0,
    price_4h_change: 0.0,
    price_24h_change: 0.0,
};

#[derive(Default)]
struct Inner {
    baskets: HashMap<Uuid, PriceChanges>,
    prices: HashMap<Uuid, Vec<PricePoint>>,
    failing_latest: HashSet<Uuid>,
    failing_history: HashSet<Uuid>,
    failing_update: HashSet<Uuid>,
    fail_listing: bool,
    writes: HashMap<Uuid, usize>,
}

/// In-memory store with per-basket failure injection.
#[derive(Default)]
pub struct MemoryPriceStore {
    inner: Mutex<Inner>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_basket(&self, prices: Vec<PricePoint>) -> Uuid {
        let id = Uuid::new_v4();
        let mut inner = self.inner.lock().unwrap();
        inner.baskets.insert(id, UNPRICED);
        inner.prices.insert(id, prices);
        id
    }

    pub fn push_price(&self, basket_id: Uuid, point: PricePoint) {
        let mut inner = self.inner.lock().unwrap();
        inner.prices.entry(basket_id).or_default().push(point);
    }

    pub fn fail_latest(&self, basket_id: Uuid) {
        self.inner.lock().unwrap().failing_latest.insert(basket_id);
    }

    pub fn fail_history(&self, basket_id: Uuid) {
        self.inner.lock().unwrap().failing_history.insert(basket_id);
    }

    pub fn fail_update(&self, basket_id: Uuid) {
        self.inner.lock().unwrap().failing_update.insert(basket_id);
    }

    pub fn fail_listing(&self) {
        self.inner.lock().unwrap().fail_listing = true;
    }

    pub fn stored(&self, basket_id: Uuid) -> PriceChanges {
        self.inner.lock().unwrap().baskets[&basket_id]
    }

    pub fn writes(&self, basket_id: Uuid) -> usize {
        self.inner.lock().unwrap().writes.get(&basket_id).copied().unwrap_or(0)
    }

    fn sorted_desc(&self, basket_id: Uuid) -> Vec<PricePoint> {
        let inner = self.inner.lock().unwrap();
        let mut points = inner.prices.get(&basket_id).cloned().unwrap_or_default();
        points.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        points
    }
}

#[async_trait]
impl PriceStore for MemoryPriceStore {
    async fn latest_price(&self, basket_id: Uuid) -> Result<Option<PricePoint>, AppError> {
        if self.inner.lock().unwrap().failing_latest.contains(&basket_id) {
            return Err(AppError::DatabaseError("connection reset".to_string()));
        }
        Ok(self.sorted_desc(basket_id).first().copied())
    }

    async fn price_history(&self, basket_id: Uuid) -> Result<Vec<PricePoint>, AppError> {
        if self.inner.lock().unwrap().failing_history.contains(&basket_id) {
            return Err(AppError::DatabaseError("statement timeout".to_string()));
        }
        Ok(self.sorted_desc(basket_id))
    }

    async fn list_basket_ids(&self) -> Result<Vec<Uuid>, AppError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_listing {
            return Err(AppError::DatabaseError("relation \"baskets\" is unavailable".to_string()));
        }
        Ok(inner.baskets.keys().copied().collect())
    }

    async fn update_price_changes(&self, basket_id: Uuid, changes: &PriceChanges) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing_update.contains(&basket_id) {
            return Err(AppError::DatabaseError("write rejected".to_string()));
        }
        match inner.baskets.get_mut(&basket_id) {
            Some(stored) => *stored = *changes,
            None => return Err(AppError::NotFound(format!("Basket {}", basket_id))),
        }
        *inner.writes.entry(basket_id).or_default() += 1;
        Ok(())
    }
}
