use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::AppError;
use crate::models::Basket;

/// Columns of the basket table that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    CurrentPrice,
    Price1hChange,
    Price4hChange,
    Price24hChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "currentPrice" => Ok(SortField::CurrentPrice),
            "price1hChange" => Ok(SortField::Price1hChange),
            "price4hChange" => Ok(SortField::Price4hChange),
            "price24hChange" => Ok(SortField::Price24hChange),
            other => Err(AppError::ValidationError(format!("Unknown sort field: {}", other))),
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AppError::ValidationError(format!("Unknown sort direction: {}", other))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortField::Name => "name",
            SortField::CurrentPrice => "currentPrice",
            SortField::Price1hChange => "price1hChange",
            SortField::Price4hChange => "price4hChange",
            SortField::Price24hChange => "price24hChange",
        };
        f.write_str(name)
    }
}

/// Current sort of the basket table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: the active column flips direction, any other column starts ascending.
    pub fn toggle(self, clicked: SortField) -> Self {
        if self.field == clicked {
            Self::new(clicked, self.direction.flipped())
        } else {
            Self::new(clicked, SortDirection::Asc)
        }
    }

    pub fn compare(&self, a: &Basket, b: &Basket) -> Ordering {
        let ordering = match self.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::CurrentPrice => a.current_price.total_cmp(&b.current_price),
            SortField::Price1hChange => a.price_1h_change.total_cmp(&b.price_1h_change),
            SortField::Price4hChange => a.price_4h_change.total_cmp(&b.price_4h_change),
            SortField::Price24hChange => a.price_24h_change.total_cmp(&b.price_24h_change),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable sort, so ties keep their incoming order.
    pub fn sort(&self, baskets: &mut [Basket]) {
        baskets.sort_by(|a, b| self.compare(a, b));
    }
}
