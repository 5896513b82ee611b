//! Market price outlook worksheet.
//!
//! Compares an observed market quote against the crop's reference price from
//! the cost tables and classifies the movement. Changes within ±0.5% count
//! as stable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_dp1;
use crate::tables::BaselineTables;

/// Errors that can occur during price outlook calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketWorksheetError {
    /// The observed quote must be positive.
    #[error("observed price must be positive, got {0}")]
    InvalidQuote(Decimal),

    /// The reference price in the tables must be positive.
    #[error("reference price for '{0}' is not positive")]
    InvalidReferencePrice(String),
}

/// Direction of the observed price relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTrend {
    Falling,
    Stable,
    Rising,
}

impl PriceTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Falling => "falling",
            Self::Stable => "stable",
            Self::Rising => "rising",
        }
    }
}

/// Price outlook for one crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOutlook {
    pub crop: String,
    /// Reference price per ton from the cost tables.
    pub reference_price: Decimal,
    pub observed_price: Decimal,
    /// Percentage change from reference, one decimal place.
    pub change_pct: Decimal,
    pub trend: PriceTrend,
}

/// Calculator for the market outlook worksheet.
#[derive(Debug, Clone)]
pub struct MarketWorksheet<'a> {
    tables: &'a BaselineTables,
}

impl<'a> MarketWorksheet<'a> {
    pub fn new(tables: &'a BaselineTables) -> Self {
        Self { tables }
    }

    /// Reference price per ton for a crop key (default record for unknown
    /// crops).
    pub fn reference_price(&self, crop: &str) -> Decimal {
        self.tables.resolve_cost(crop).market_price
    }

    /// Classifies an observed quote against the reference price.
    ///
    /// # Errors
    ///
    /// Rejects non-positive quotes, and non-positive reference prices (which
    /// indicate corrupt tables).
    pub fn outlook(
        &self,
        crop: &str,
        observed_price: Decimal,
    ) -> Result<PriceOutlook, MarketWorksheetError> {
        if observed_price <= Decimal::ZERO {
            return Err(MarketWorksheetError::InvalidQuote(observed_price));
        }

        let reference_price = self.reference_price(crop);
        if reference_price <= Decimal::ZERO {
            return Err(MarketWorksheetError::InvalidReferencePrice(crop.to_string()));
        }

        let change_pct = round_dp1(
            (observed_price - reference_price) / reference_price * Decimal::from(100),
        );

        Ok(PriceOutlook {
            crop: crop.to_string(),
            reference_price,
            observed_price,
            change_pct,
            trend: Self::classify_trend(change_pct),
        })
    }

    /// Movements beyond ±0.5% classify as rising or falling.
    pub fn classify_trend(change_pct: Decimal) -> PriceTrend {
        let cutoff = Decimal::new(5, 1);
        if change_pct > cutoff {
            PriceTrend::Rising
        } else if change_pct < -cutoff {
            PriceTrend::Falling
        } else {
            PriceTrend::Stable
        }
    }
}
