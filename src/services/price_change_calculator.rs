use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, warn};
use uuid::Uuid;
use crate::models::{PriceChanges, PricePoint};
use crate::services::price_store::PriceStore;
use crate::utils::math::percentage_change;

/// Lookback windows tracked on every basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    OneHour,
    FourHours,
    OneDay,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::OneHour, Horizon::FourHours, Horizon::OneDay];

    pub fn seconds(self) -> i64 {
        match self {
            Horizon::OneHour => 3_600,
            Horizon::FourHours => 14_400,
            Horizon::OneDay => 86_400,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::seconds(self.seconds())
    }
}

/// Price the change over `horizon` is measured against.
///
/// Scans `history` (newest first) for the first point at least `horizon` old. When none is old enough
/// this falls back to `history[0]`, the newest point, and to `latest` when the history is empty.
pub fn reference_price(latest: &PricePoint, history: &[PricePoint], now: DateTime<Utc>, horizon: Horizon) -> f64 {
    let threshold = horizon.duration();

    history
        .iter()
        .find(|point| now - point.timestamp >= threshold)
        .or_else(|| history.first())
        .unwrap_or(latest)
        .price
}

/// Derived price fields for one basket, computed from a single snapshot of its history.
pub fn compute_price_changes(latest: &PricePoint, history: &[PricePoint], now: DateTime<Utc>) -> PriceChanges {
    let change = |horizon| percentage_change(reference_price(latest, history, now, horizon), latest.price);

    PriceChanges {
        current_price: latest.price,
        price_1h_change: change(Horizon::OneHour),
        price_4h_change: change(Horizon::FourHours),
        price_24h_change: change(Horizon::OneDay),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoPriceData,
    LatestFetchFailed,
    HistoryFetchFailed,
    PersistFailed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BasketUpdateOutcome {
    Updated(PriceChanges),
    Skipped(SkipReason),
}

impl BasketUpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, BasketUpdateOutcome::Updated(_))
    }
}

/// Recomputes and stores the derived price fields of a basket.
///
/// Store failures never escape: they are logged and the basket is left untouched.
#[derive(Clone)]
pub struct PriceChangeCalculator {
    store: Arc<dyn PriceStore>,
}

impl PriceChangeCalculator {
    pub fn new(store: Arc<dyn PriceStore>) -> Self {
        Self { store }
    }

    pub async fn compute_and_persist(&self, basket_id: Uuid) -> BasketUpdateOutcome {
        self.compute_and_persist_at(basket_id, Utc::now()).await
    }

    /// Same as [`compute_and_persist`](Self::compute_and_persist) with `now` fixed by the caller.
    pub async fn compute_and_persist_at(&self, basket_id: Uuid, now: DateTime<Utc>) -> BasketUpdateOutcome {
        let latest = match self.store.latest_price(basket_id).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                warn!("No price data for basket {}, skipping update", basket_id);
                return BasketUpdateOutcome::Skipped(SkipReason::NoPriceData);
            }
            Err(e) => {
                error!("Error fetching latest basket price for {}: {}", basket_id, e);
                return BasketUpdateOutcome::Skipped(SkipReason::LatestFetchFailed);
            }
        };

        let history = match self.store.price_history(basket_id).await {
            Ok(history) => history,
            Err(e) => {
                error!("Error fetching historical basket prices for {}: {}", basket_id, e);
                return BasketUpdateOutcome::Skipped(SkipReason::HistoryFetchFailed);
            }
        };

        let changes = compute_price_changes(&latest, &history, now);

        if let Err(e) = self.store.update_price_changes(basket_id, &changes).await {
            error!("Error storing price changes for basket {}: {}", basket_id, e);
            return BasketUpdateOutcome::Skipped(SkipReason::PersistFailed);
        }

        debug!(
            "Basket {} priced at {} (1h {:.4}%, 4h {:.4}%, 24h {:.4}%) from {} points",
            basket_id,
            changes.current_price,
            changes.price_1h_change,
            changes.price_4h_change,
            changes.price_24h_change,
            history.len()
        );
        BasketUpdateOutcome::Updated(changes)
    }
}
