use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{error, info};
use crate::error::AppError;
use crate::services::price_change_calculator::PriceChangeCalculator;
use crate::services::price_store::PriceStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Recomputes price changes for every basket.
pub struct PriceUpdateJob {
    store: Arc<dyn PriceStore>,
    calculator: PriceChangeCalculator,
}

impl PriceUpdateJob {
    pub fn new(store: Arc<dyn PriceStore>) -> Self {
        let calculator = PriceChangeCalculator::new(store.clone());
        Self { store, calculator }
    }

    /// Runs one task per basket and waits for all of them.
    ///
    /// Only a failure to enumerate baskets is returned. Per-basket failures are logged by the
    /// calculator and counted as skipped.
    pub async fn run(&self) -> Result<BatchSummary, AppError> {
        let basket_ids = self.store.list_basket_ids().await.map_err(|e| {
            error!("Error fetching baskets: {}", e);
            e
        })?;

        let mut tasks = JoinSet::new();
        for basket_id in basket_ids.iter().copied() {
            let calculator = self.calculator.clone();
            tasks.spawn(async move { calculator.compute_and_persist(basket_id).await });
        }

        let mut summary = BatchSummary {
            total: basket_ids.len(),
            ..Default::default()
        };
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) if outcome.is_updated() => summary.updated += 1,
                Ok(_) => summary.skipped += 1,
                Err(e) => {
                    error!("Basket price update task failed: {}", e);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "Basket price changes updated: {} of {} baskets ({} skipped)",
            summary.updated, summary.total, summary.skipped
        );
        Ok(summary)
    }

    /// Runs the batch every `period` until the returned handle is aborted.
    pub fn spawn_interval(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!("Scheduled basket price updates every {}s", period.as_secs());

            loop {
                ticker.tick().await;
                if let Err(e) = self.run().await {
                    error!("Scheduled price update failed: {}", e);
                }
            }
        })
    }
}
