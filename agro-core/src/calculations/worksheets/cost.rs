//! Cultivation cost and profitability worksheet.
//!
//! Scales the crop's per-hectare cost components by the normalized area
//! (whole-unit rounding per component), then derives profitability from the
//! expected yield and reference market price:
//!
//! | Step | Derivation |
//! |------|------------|
//! | 1    | scaled component = round(per-hectare cost × area in ha) |
//! | 2    | total cost = sum of scaled components |
//! | 3    | expected yield = base yield × area in ha |
//! | 4    | gross income = yield × market price |
//! | 5    | net profit = gross income − total cost |
//! | 6    | profit margin % = net ÷ gross × 100 (0 when gross ≤ 0) |
//! | 7    | ROI % = net ÷ total × 100 (0 when total ≤ 0) |
//! | 8    | break-even yield = total ÷ market price |
//!
//! Band cutoffs are strict: a margin of exactly 20% is moderate, not
//! excellent.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use agro_core::calculations::{CostWorksheet, ProfitOutcome};
//! use agro_core::models::Area;
//! use agro_core::tables::{BaselineTables, CropBaseline, CropCostRecord};
//!
//! let tables = BaselineTables::new(
//!     vec![CropBaseline {
//!         crop: "rice".to_string(),
//!         base_yield_t_ha: dec!(4.5),
//!         water_need_mm_day: dec!(8.5),
//!         season_days: 120,
//!     }],
//!     vec![CropCostRecord {
//!         crop: "rice".to_string(),
//!         seeds: dec!(2500),
//!         fertilizers: dec!(5000),
//!         pesticides: dec!(2000),
//!         irrigation: dec!(3000),
//!         labor: dec!(8000),
//!         machinery: dec!(4000),
//!         others: dec!(1500),
//!         market_price: dec!(20000),
//!     }],
//!     vec![],
//!     vec![],
//! );
//!
//! let breakdown = CostWorksheet::new(&tables)
//!     .calculate("rice", Area::hectares(dec!(2)))
//!     .unwrap();
//!
//! assert_eq!(breakdown.components.seeds, dec!(5000));
//! assert_eq!(breakdown.total_cost, dec!(52000));
//! assert_eq!(breakdown.profitability.break_even_yield_t, dec!(2.60));
//! assert_eq!(breakdown.profitability.outcome, ProfitOutcome::Profitable);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{round_dp1, round_dp2, round_whole};
use crate::models::Area;
use crate::tables::BaselineTables;

/// Errors that can occur during cost calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostWorksheetError {
    /// The land area must be positive.
    #[error("land area must be positive, got {0} ha")]
    InvalidArea(Decimal),
}

/// Qualitative band for profit margin and ROI. Ordered worst to best so that
/// band comparisons follow metric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceBand {
    Poor,
    Moderate,
    Excellent,
}

impl PerformanceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Moderate => "moderate",
            Self::Excellent => "excellent",
        }
    }
}

/// Overall outcome of the season at the given inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfitOutcome {
    Profitable,
    Loss,
}

impl ProfitOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profitable => "profitable",
            Self::Loss => "loss",
        }
    }
}

/// How far the expected yield sits above the break-even yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum YieldSafety {
    BelowBreakEven,
    AboveBreakEven,
    SafeMargin,
}

impl YieldSafety {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BelowBreakEven => "below break-even",
            Self::AboveBreakEven => "above break-even",
            Self::SafeMargin => "safe margin",
        }
    }
}

/// The seven cultivation cost components, scaled to the full area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostComponents {
    pub seeds: Decimal,
    pub fertilizers: Decimal,
    pub pesticides: Decimal,
    pub irrigation: Decimal,
    pub labor: Decimal,
    pub machinery: Decimal,
    pub others: Decimal,
}

impl CostComponents {
    pub fn total(&self) -> Decimal {
        self.seeds
            + self.fertilizers
            + self.pesticides
            + self.irrigation
            + self.labor
            + self.machinery
            + self.others
    }

    /// Name and value of the largest component. Ties go to the first in
    /// component order (seeds through others).
    pub fn largest(&self) -> (&'static str, Decimal) {
        let entries = [
            ("seeds", self.seeds),
            ("fertilizers", self.fertilizers),
            ("pesticides", self.pesticides),
            ("irrigation", self.irrigation),
            ("labor", self.labor),
            ("machinery", self.machinery),
            ("others", self.others),
        ];

        let mut largest = entries[0];
        for entry in &entries[1..] {
            if entry.1 > largest.1 {
                largest = *entry;
            }
        }
        largest
    }
}

/// Profitability figures derived from cost components, yield, and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profitability {
    pub gross_income: Decimal,
    pub net_profit: Decimal,

    /// Net ÷ gross × 100, one decimal place. Zero when gross income is zero.
    pub profit_margin_pct: Decimal,

    /// Net ÷ total cost × 100, one decimal place. Zero when total cost is zero.
    pub roi_pct: Decimal,

    /// Total cost ÷ market price, two decimal places. Zero when the price is
    /// not positive.
    pub break_even_yield_t: Decimal,

    pub margin_band: PerformanceBand,
    pub roi_band: PerformanceBand,
    pub outcome: ProfitOutcome,
    pub yield_safety: YieldSafety,
}

/// Full result of the cost worksheet for one crop and area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub crop: String,
    pub area_ha: Decimal,
    pub components: CostComponents,
    pub total_cost: Decimal,
    pub market_price: Decimal,
    /// Expected yield in tons at the baseline rate over the whole area.
    pub expected_yield_t: Decimal,
    pub profitability: Profitability,
}

/// Calculator for the cost worksheet.
#[derive(Debug, Clone)]
pub struct CostWorksheet<'a> {
    tables: &'a BaselineTables,
}

impl<'a> CostWorksheet<'a> {
    pub fn new(tables: &'a BaselineTables) -> Self {
        Self { tables }
    }

    /// Scales the crop's cost record by area and derives profitability at the
    /// baseline yield and reference price.
    ///
    /// # Errors
    ///
    /// Returns [`CostWorksheetError::InvalidArea`] if the normalized area is
    /// zero or negative. Unknown crop keys resolve to the default records.
    pub fn calculate(
        &self,
        crop: &str,
        area: Area,
    ) -> Result<CostBreakdown, CostWorksheetError> {
        let area_ha = area.to_hectares();
        if area_ha <= Decimal::ZERO {
            return Err(CostWorksheetError::InvalidArea(area_ha));
        }

        let record = self.tables.resolve_cost(crop);
        let baseline = self.tables.resolve_crop(crop);

        let components = CostComponents {
            seeds: round_whole(record.seeds * area_ha),
            fertilizers: round_whole(record.fertilizers * area_ha),
            pesticides: round_whole(record.pesticides * area_ha),
            irrigation: round_whole(record.irrigation * area_ha),
            labor: round_whole(record.labor * area_ha),
            machinery: round_whole(record.machinery * area_ha),
            others: round_whole(record.others * area_ha),
        };
        let total_cost = components.total();

        let expected_yield_t = baseline.base_yield_t_ha * area_ha;
        let profitability =
            Self::profitability(&components, expected_yield_t, record.market_price);

        Ok(CostBreakdown {
            crop: crop.to_string(),
            area_ha,
            components,
            total_cost,
            market_price: record.market_price,
            expected_yield_t,
            profitability,
        })
    }

    /// Derives profitability from arbitrary components, yield, and price.
    ///
    /// Used both by [`calculate`](Self::calculate) and for re-running the
    /// analysis after the user edits individual cost inputs.
    pub fn profitability(
        components: &CostComponents,
        yield_t: Decimal,
        market_price: Decimal,
    ) -> Profitability {
        let total_cost = components.total();
        let gross_income = yield_t * market_price;
        let net_profit = gross_income - total_cost;

        let profit_margin_pct = if gross_income > Decimal::ZERO {
            round_dp1(net_profit / gross_income * Decimal::from(100))
        } else {
            Decimal::ZERO
        };

        let roi_pct = if total_cost > Decimal::ZERO {
            round_dp1(net_profit / total_cost * Decimal::from(100))
        } else {
            Decimal::ZERO
        };

        let break_even_yield_t = if market_price > Decimal::ZERO {
            round_dp2(total_cost / market_price)
        } else {
            Decimal::ZERO
        };

        let outcome = if net_profit > Decimal::ZERO {
            ProfitOutcome::Profitable
        } else {
            ProfitOutcome::Loss
        };

        Profitability {
            gross_income,
            net_profit,
            profit_margin_pct,
            roi_pct,
            break_even_yield_t,
            margin_band: Self::classify_margin(profit_margin_pct),
            roi_band: Self::classify_roi(roi_pct),
            outcome,
            yield_safety: Self::classify_yield_safety(yield_t, break_even_yield_t),
        }
    }

    /// Margin above 20% is excellent, any positive margin is moderate.
    pub fn classify_margin(margin_pct: Decimal) -> PerformanceBand {
        if margin_pct > Decimal::from(20) {
            PerformanceBand::Excellent
        } else if margin_pct > Decimal::ZERO {
            PerformanceBand::Moderate
        } else {
            PerformanceBand::Poor
        }
    }

    /// ROI above 30% is excellent, any positive ROI is moderate.
    pub fn classify_roi(roi_pct: Decimal) -> PerformanceBand {
        if roi_pct > Decimal::from(30) {
            PerformanceBand::Excellent
        } else if roi_pct > Decimal::ZERO {
            PerformanceBand::Moderate
        } else {
            PerformanceBand::Poor
        }
    }

    /// Yield 50% above break-even is a safe margin; anything over break-even
    /// still clears costs.
    pub fn classify_yield_safety(
        yield_t: Decimal,
        break_even_yield_t: Decimal,
    ) -> YieldSafety {
        if yield_t > break_even_yield_t * Decimal::new(15, 1) {
            YieldSafety::SafeMargin
        } else if yield_t > break_even_yield_t {
            YieldSafety::AboveBreakEven
        } else {
            YieldSafety::BelowBreakEven
        }
    }

    /// Plain-language recommendations for the given breakdown.
    pub fn recommendations(breakdown: &CostBreakdown) -> Vec<String> {
        let mut recommendations = Vec::new();
        let profitability = &breakdown.profitability;

        if profitability.net_profit < Decimal::ZERO {
            recommendations.push(
                "Your current inputs result in a loss. Consider reducing costs, increasing \
                 yield, or finding better market prices."
                    .to_string(),
            );
        }

        if profitability.profit_margin_pct >= Decimal::ZERO
            && profitability.profit_margin_pct < Decimal::from(15)
        {
            recommendations.push(
                "Your profit margin is relatively low. Look for ways to reduce input costs \
                 or improve yield."
                    .to_string(),
            );
        } else if profitability.profit_margin_pct >= Decimal::from(15) {
            recommendations.push(
                "Your current inputs show good profit potential. Focus on maintaining yield \
                 and quality."
                    .to_string(),
            );
        }

        recommendations.push(match breakdown.components.largest().0 {
            "labor" => "Labor is your highest cost. Consider mechanization where possible to \
                        reduce labor costs."
                .to_string(),
            "fertilizers" => "Fertilizers are your highest cost. Consider soil testing to \
                              optimize fertilizer application."
                .to_string(),
            _ => "Focus on reducing your highest cost inputs while maintaining productivity."
                .to_string(),
        });

        recommendations
    }
}
