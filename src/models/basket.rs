use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use crate::error::AppError;

/// Allocations may drift from 100 by this much before a basket is rejected.
pub const ALLOCATION_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAllocation {
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub allocation_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub id: Uuid,
    pub name: String,
    #[sqlx(json)]
    pub tokens: Vec<TokenAllocation>,
    pub rebalance_interval: i32,
    pub current_price: f64,
    pub price_1h_change: f64,
    pub price_4h_change: f64,
    pub price_24h_change: f64,
    pub created_at: DateTime<Utc>,
}

/// The derived fields written by a price-change run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChanges {
    pub current_price: f64,
    pub price_1h_change: f64,
    pub price_4h_change: f64,
    pub price_24h_change: f64,
}

impl Basket {
    pub fn new(create: CreateBasket) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: create.name.trim().to_string(),
            tokens: create.tokens,
            rebalance_interval: create.rebalance_interval,
            current_price: 0.0,
            price_1h_change: 0.0,
            price_4h_change: 0.0,
            price_24h_change: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn price_changes(&self) -> PriceChanges {
        PriceChanges {
            current_price: self.current_price,
            price_1h_change: self.price_1h_change,
            price_4h_change: self.price_4h_change,
            price_24h_change: self.price_24h_change,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBasket {
    pub name: String,
    pub tokens: Vec<TokenAllocation>,
    pub rebalance_interval: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBasket {
    pub name: Option<String>,
    pub tokens: Option<Vec<TokenAllocation>>,
    pub rebalance_interval: Option<i32>,
}

impl CreateBasket {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)?;
        validate_rebalance_interval(self.rebalance_interval)?;
        validate_tokens(&self.tokens)
    }
}

impl UpdateBasket {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(interval) = self.rebalance_interval {
            validate_rebalance_interval(interval)?;
        }
        if let Some(tokens) = &self.tokens {
            validate_tokens(tokens)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.tokens.is_none() && self.rebalance_interval.is_none()
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("Basket name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_rebalance_interval(days: i32) -> Result<(), AppError> {
    if days < 1 {
        return Err(AppError::ValidationError(format!(
            "Rebalance interval must be at least 1 day, got {}",
            days
        )));
    }
    Ok(())
}

pub fn validate_tokens(tokens: &[TokenAllocation]) -> Result<(), AppError> {
    if tokens.is_empty() {
        return Err(AppError::ValidationError("Basket must contain at least one token".to_string()));
    }

    for token in tokens {
        if token.symbol.trim().is_empty() || token.address.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Every token needs a symbol and an address".to_string(),
            ));
        }
        if !(token.allocation_percent > 0.0 && token.allocation_percent <= 100.0) {
            return Err(AppError::ValidationError(format!(
                "Allocation for {} must be in (0, 100], got {}",
                token.symbol, token.allocation_percent
            )));
        }
    }

    let total: f64 = tokens.iter().map(|t| t.allocation_percent).sum();
    if (total - 100.0).abs() > ALLOCATION_TOLERANCE {
        return Err(AppError::ValidationError(format!(
            "Token allocations must sum to 100, got {}",
            total
        )));
    }

    Ok(())
}
