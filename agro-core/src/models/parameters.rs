use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::area::{Area, AreaUnit};

/// User-supplied farm parameters for one calculation run.
///
/// Immutable per invocation; the advisory worksheets read from it and never
/// write back. Crop and soil are free-form keys so that unrecognized values
/// flow through to the default baseline records instead of failing upfront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmParameters {
    /// Crop key, e.g. `"rice"`.
    pub crop: String,

    /// Soil key, e.g. `"alluvial"`.
    pub soil: String,

    /// Land area with its entry unit.
    pub area: Area,

    /// Fertilizer application in kg per hectare. Nominal input is 100.
    pub fertilizer_kg_ha: Decimal,

    /// Expected weekly rainfall in mm. Nominal input is 50.
    pub rainfall_mm: Decimal,

    /// Average temperature in °C. Nominal input is 25.
    pub temperature_c: Decimal,

    /// Relative humidity in percent. Nominal input is 60.
    pub humidity_pct: Decimal,

    /// Daily sunlight in hours. Nominal input is 6.
    pub sunlight_hours: Decimal,
}

impl FarmParameters {
    /// Parameters at the nominal operating point: every yield factor is
    /// exactly 1 and the estimate equals the crop's base yield.
    pub fn nominal(crop: &str, soil: &str, area: Area) -> Self {
        Self {
            crop: crop.to_string(),
            soil: soil.to_string(),
            area,
            fertilizer_kg_ha: Decimal::from(100),
            rainfall_mm: Decimal::from(50),
            temperature_c: Decimal::from(25),
            humidity_pct: Decimal::from(60),
            sunlight_hours: Decimal::from(6),
        }
    }

    pub fn area_hectares(&self) -> Decimal {
        self.area.to_hectares()
    }
}

impl Default for FarmParameters {
    fn default() -> Self {
        Self::nominal("", "", Area::new(Decimal::ONE, AreaUnit::Hectares))
    }
}
