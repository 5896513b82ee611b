//! Yield estimation worksheet.
//!
//! The estimate multiplies the crop's baseline yield by five condition
//! factors, each normalized so the nominal input produces exactly 1:
//!
//! | Factor      | Definition                 | Nominal input |
//! |-------------|----------------------------|---------------|
//! | fertilizer  | kg/ha ÷ 100                | 100 kg/ha     |
//! | rainfall    | mm/week ÷ 50               | 50 mm         |
//! | temperature | 1 − \|°C − 25\| ÷ 25       | 25 °C         |
//! | humidity    | % ÷ 60                     | 60 %          |
//! | sunlight    | h/day ÷ 6                  | 6 h           |
//!
//! The per-hectare estimate is classified against the baseline: below 70% of
//! baseline is low, above 130% is high, everything between is medium. Each
//! factor under 0.8 contributes one improvement suggestion.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use agro_core::calculations::{YieldWorksheet, YieldCategory};
//! use agro_core::models::{Area, FarmParameters};
//! use agro_core::tables::{BaselineTables, CropBaseline};
//!
//! let tables = BaselineTables::new(
//!     vec![CropBaseline {
//!         crop: "rice".to_string(),
//!         base_yield_t_ha: dec!(4.5),
//!         water_need_mm_day: dec!(8.5),
//!         season_days: 120,
//!     }],
//!     vec![],
//!     vec![],
//!     vec![],
//! );
//!
//! let params = FarmParameters::nominal("rice", "alluvial", Area::hectares(dec!(2)));
//! let estimate = YieldWorksheet::new(&tables).calculate(&params).unwrap();
//!
//! assert_eq!(estimate.estimated_yield_t_ha, dec!(4.50));
//! assert_eq!(estimate.total_yield_t, dec!(9.00));
//! assert_eq!(estimate.category, YieldCategory::Medium);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_dp2;
use crate::models::FarmParameters;
use crate::tables::BaselineTables;

/// Errors that can occur during yield estimation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum YieldWorksheetError {
    /// The land area must be positive.
    #[error("land area must be positive, got {0} ha")]
    InvalidArea(Decimal),
}

/// Qualitative yield band relative to the crop's baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldCategory {
    Low,
    Medium,
    High,
}

impl YieldCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Result of the yield estimation worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub crop: String,

    /// Baseline yield for the crop in tons per hectare.
    pub base_yield_t_ha: Decimal,

    // Condition factors, each 1 at the nominal input.
    pub fertilizer_factor: Decimal,
    pub rainfall_factor: Decimal,
    pub temperature_factor: Decimal,
    pub humidity_factor: Decimal,
    pub sunlight_factor: Decimal,

    /// Estimated yield in tons per hectare, two decimal places.
    pub estimated_yield_t_ha: Decimal,

    /// Estimated total yield over the whole area, two decimal places.
    pub total_yield_t: Decimal,

    pub category: YieldCategory,

    /// One entry per under-performing factor, or a single all-clear message.
    pub suggestions: Vec<String>,
}

/// Calculator for the yield estimation worksheet.
#[derive(Debug, Clone)]
pub struct YieldWorksheet<'a> {
    tables: &'a BaselineTables,
}

impl<'a> YieldWorksheet<'a> {
    pub fn new(tables: &'a BaselineTables) -> Self {
        Self { tables }
    }

    /// Runs the worksheet for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`YieldWorksheetError::InvalidArea`] if the normalized area is
    /// zero or negative. Unknown crop keys do not error; they resolve to the
    /// default baseline record.
    pub fn calculate(
        &self,
        params: &FarmParameters,
    ) -> Result<YieldEstimate, YieldWorksheetError> {
        let area_ha = params.area_hectares();
        if area_ha <= Decimal::ZERO {
            return Err(YieldWorksheetError::InvalidArea(area_ha));
        }

        let baseline = self.tables.resolve_crop(&params.crop);
        let base_yield = baseline.base_yield_t_ha;

        let fertilizer_factor = params.fertilizer_kg_ha / Decimal::from(100);
        let rainfall_factor = params.rainfall_mm / Decimal::from(50);
        let temperature_factor =
            Decimal::ONE - (params.temperature_c - Decimal::from(25)).abs() / Decimal::from(25);
        let humidity_factor = params.humidity_pct / Decimal::from(60);
        let sunlight_factor = params.sunlight_hours / Decimal::from(6);

        if temperature_factor <= Decimal::ZERO {
            warn!(
                temperature_c = %params.temperature_c,
                temperature_factor = %temperature_factor,
                "temperature more than 25 degrees from optimum; estimate will not be meaningful"
            );
        }

        let estimated_per_ha = round_dp2(
            base_yield
                * fertilizer_factor
                * rainfall_factor
                * temperature_factor
                * humidity_factor
                * sunlight_factor,
        );
        let total = round_dp2(estimated_per_ha * area_ha);

        let category = Self::categorize(estimated_per_ha, base_yield);

        let suggestions = Self::suggestions(
            fertilizer_factor,
            rainfall_factor,
            temperature_factor,
            humidity_factor,
            sunlight_factor,
        );

        Ok(YieldEstimate {
            crop: params.crop.clone(),
            base_yield_t_ha: base_yield,
            fertilizer_factor,
            rainfall_factor,
            temperature_factor,
            humidity_factor,
            sunlight_factor,
            estimated_yield_t_ha: estimated_per_ha,
            total_yield_t: total,
            category,
            suggestions,
        })
    }

    /// Buckets the estimate relative to the baseline yield.
    ///
    /// Boundaries belong to the medium band: exactly 70% or 130% of baseline
    /// is still medium.
    fn categorize(
        estimated_per_ha: Decimal,
        base_yield: Decimal,
    ) -> YieldCategory {
        let low_cutoff = base_yield * Decimal::new(7, 1);
        let high_cutoff = base_yield * Decimal::new(13, 1);

        if estimated_per_ha < low_cutoff {
            YieldCategory::Low
        } else if estimated_per_ha > high_cutoff {
            YieldCategory::High
        } else {
            YieldCategory::Medium
        }
    }

    /// One improvement suggestion per factor below 0.8.
    fn suggestions(
        fertilizer: Decimal,
        rainfall: Decimal,
        temperature: Decimal,
        humidity: Decimal,
        sunlight: Decimal,
    ) -> Vec<String> {
        let threshold = Decimal::new(8, 1);
        let mut suggestions = Vec::new();

        if fertilizer < threshold {
            suggestions.push(
                "Increase fertilizer application by 20-30% for better nutrient availability."
                    .to_string(),
            );
        }
        if rainfall < threshold {
            suggestions
                .push("Implement irrigation to compensate for low rainfall conditions.".to_string());
        }
        if temperature < threshold {
            suggestions
                .push("Consider adjusting planting time to avoid extreme temperatures.".to_string());
        }
        if humidity < threshold {
            suggestions
                .push("Use mulching to retain soil moisture and improve humidity levels.".to_string());
        }
        if sunlight < threshold {
            suggestions.push(
                "Ensure proper spacing between plants to maximize sunlight exposure.".to_string(),
            );
        }

        if suggestions.is_empty() {
            suggestions.push("Your farming practices are already optimized!".to_string());
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::Area;
    use crate::tables::CropBaseline;

    use super::*;

    fn test_tables() -> BaselineTables {
        BaselineTables::new(
            vec![
                CropBaseline {
                    crop: "rice".to_string(),
                    base_yield_t_ha: dec!(4.5),
                    water_need_mm_day: dec!(8.5),
                    season_days: 120,
                },
                CropBaseline {
                    crop: "sugarcane".to_string(),
                    base_yield_t_ha: dec!(70),
                    water_need_mm_day: dec!(7.0),
                    season_days: 360,
                },
            ],
            vec![],
            vec![],
            vec![],
        )
    }

    fn nominal_rice() -> FarmParameters {
        FarmParameters::nominal("rice", "alluvial", Area::hectares(dec!(1)))
    }

    /// Captures warn-level output for tests that exercise warning paths.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // factor tests
    // =========================================================================

    #[test]
    fn nominal_inputs_produce_unit_factors() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let estimate = worksheet.calculate(&nominal_rice()).unwrap();

        assert_eq!(estimate.fertilizer_factor, dec!(1));
        assert_eq!(estimate.rainfall_factor, dec!(1));
        assert_eq!(estimate.temperature_factor, dec!(1));
        assert_eq!(estimate.humidity_factor, dec!(1));
        assert_eq!(estimate.sunlight_factor, dec!(1));
    }

    #[test]
    fn nominal_estimate_equals_base_yield() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let estimate = worksheet.calculate(&nominal_rice()).unwrap();

        assert_eq!(estimate.estimated_yield_t_ha, dec!(4.50));
        assert_eq!(estimate.category, YieldCategory::Medium);
    }

    #[test]
    fn temperature_factor_is_symmetric_around_optimum() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut cold = nominal_rice();
        cold.temperature_c = dec!(15);
        let mut hot = nominal_rice();
        hot.temperature_c = dec!(35);

        let cold_estimate = worksheet.calculate(&cold).unwrap();
        let hot_estimate = worksheet.calculate(&hot).unwrap();

        assert_eq!(cold_estimate.temperature_factor, dec!(0.6));
        assert_eq!(
            cold_estimate.temperature_factor,
            hot_estimate.temperature_factor
        );
    }

    #[test]
    fn extreme_temperature_drives_factor_negative() {
        let _guard = init_test_tracing();
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut params = nominal_rice();
        params.temperature_c = dec!(60);

        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(estimate.temperature_factor, dec!(-0.4));
        assert!(estimate.estimated_yield_t_ha < Decimal::ZERO);
        assert_eq!(estimate.category, YieldCategory::Low);
    }

    // =========================================================================
    // categorization tests
    // =========================================================================

    #[test]
    fn low_fertilizer_halves_the_estimate_into_low_band() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut params = nominal_rice();
        params.fertilizer_kg_ha = dec!(50);

        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(estimate.estimated_yield_t_ha, dec!(2.25));
        assert_eq!(estimate.category, YieldCategory::Low);
    }

    #[test]
    fn generous_inputs_reach_high_band() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut params = nominal_rice();
        params.fertilizer_kg_ha = dec!(150);
        params.rainfall_mm = dec!(75);

        let estimate = worksheet.calculate(&params).unwrap();

        // 4.5 × 1.5 × 1.5 = 10.125 > 4.5 × 1.3
        assert_eq!(estimate.estimated_yield_t_ha, dec!(10.13));
        assert_eq!(estimate.category, YieldCategory::High);
    }

    #[test]
    fn estimate_at_exactly_seventy_percent_is_still_medium() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut params = nominal_rice();
        params.fertilizer_kg_ha = dec!(70); // factor 0.7, estimate 3.15 = cutoff

        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(estimate.estimated_yield_t_ha, dec!(3.15));
        assert_eq!(estimate.category, YieldCategory::Medium);
    }

    #[test]
    fn unknown_crop_uses_default_base_yield() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let params = FarmParameters::nominal("quinoa", "alluvial", Area::hectares(dec!(1)));
        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(estimate.base_yield_t_ha, dec!(3.0));
        assert_eq!(estimate.estimated_yield_t_ha, dec!(3.00));
    }

    // =========================================================================
    // suggestion tests
    // =========================================================================

    #[test]
    fn nominal_inputs_get_all_clear_message() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let estimate = worksheet.calculate(&nominal_rice()).unwrap();

        assert_eq!(
            estimate.suggestions,
            vec!["Your farming practices are already optimized!".to_string()]
        );
    }

    #[test]
    fn each_weak_factor_contributes_one_suggestion() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut params = nominal_rice();
        params.fertilizer_kg_ha = dec!(60); // 0.6
        params.rainfall_mm = dec!(30); // 0.6

        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(estimate.suggestions.len(), 2);
        assert!(estimate.suggestions[0].contains("fertilizer"));
        assert!(estimate.suggestions[1].contains("irrigation"));
    }

    #[test]
    fn factor_at_exactly_point_eight_gets_no_suggestion() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let mut params = nominal_rice();
        params.fertilizer_kg_ha = dec!(80);

        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(
            estimate.suggestions,
            vec!["Your farming practices are already optimized!".to_string()]
        );
    }

    // =========================================================================
    // area handling
    // =========================================================================

    #[test]
    fn total_yield_scales_with_area() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let params = FarmParameters::nominal("rice", "alluvial", Area::hectares(dec!(2)));
        let estimate = worksheet.calculate(&params).unwrap();

        assert_eq!(estimate.total_yield_t, dec!(9.00));
    }

    #[test]
    fn acres_are_normalized_before_scaling() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let params = FarmParameters::nominal("rice", "alluvial", Area::acres(dec!(1)));
        let estimate = worksheet.calculate(&params).unwrap();

        // 4.5 × 0.404686 = 1.821087
        assert_eq!(estimate.total_yield_t, dec!(1.82));
    }

    #[test]
    fn zero_area_is_rejected() {
        let tables = test_tables();
        let worksheet = YieldWorksheet::new(&tables);

        let params = FarmParameters::nominal("rice", "alluvial", Area::hectares(dec!(0)));
        let result = worksheet.calculate(&params);

        assert_eq!(result, Err(YieldWorksheetError::InvalidArea(dec!(0))));
    }
}
