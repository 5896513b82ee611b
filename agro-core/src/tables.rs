//! Read-only baseline constant tables.
//!
//! Every advisory calculation is a pure function of the user's parameters and
//! these per-category constants. The tables are assembled once at startup
//! (normally from the repository, which agro-data seeds from CSV) and never
//! mutated afterwards.
//!
//! Lookups never fail: an unrecognized crop or soil key silently resolves to
//! the documented default record. That substitution is policy, not an error;
//! the advisors give generic answers for any crop they have no data for.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-crop agronomic baseline: expected yield, daily water demand, and
/// growing-season length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBaseline {
    pub crop: String,
    /// Expected yield in tons per hectare under nominal conditions.
    pub base_yield_t_ha: Decimal,
    /// Crop water demand in mm per day, before the soil retention factor.
    pub water_need_mm_day: Decimal,
    /// Growing season length in days.
    pub season_days: i32,
}

impl CropBaseline {
    /// Record substituted for unknown crop keys: 3.0 t/ha, 5.0 mm/day,
    /// 120-day season.
    pub fn default_record() -> Self {
        Self {
            crop: "default".to_string(),
            base_yield_t_ha: Decimal::new(30, 1),
            water_need_mm_day: Decimal::new(50, 1),
            season_days: 120,
        }
    }
}

/// Per-crop cultivation cost components (per hectare) and the reference
/// market price per ton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCostRecord {
    pub crop: String,
    pub seeds: Decimal,
    pub fertilizers: Decimal,
    pub pesticides: Decimal,
    pub irrigation: Decimal,
    pub labor: Decimal,
    pub machinery: Decimal,
    pub others: Decimal,
    /// Reference market price per ton.
    pub market_price: Decimal,
}

impl CropCostRecord {
    /// Record substituted for crops without specific cost data.
    pub fn default_record() -> Self {
        Self {
            crop: "default".to_string(),
            seeds: Decimal::from(3000),
            fertilizers: Decimal::from(5000),
            pesticides: Decimal::from(2000),
            irrigation: Decimal::from(3000),
            labor: Decimal::from(7000),
            machinery: Decimal::from(4000),
            others: Decimal::from(1500),
            market_price: Decimal::from(20000),
        }
    }
}

/// Trace micronutrient levels in ppm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Micronutrients {
    pub zinc: Decimal,
    pub iron: Decimal,
    pub manganese: Decimal,
    pub copper: Decimal,
    pub boron: Decimal,
}

/// Particle-size composition in percent; the three fields sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilTexture {
    pub sand: Decimal,
    pub silt: Decimal,
    pub clay: Decimal,
}

/// Reference chemistry and composition of a soil type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub soil: String,
    pub ph: Decimal,
    pub organic_matter_pct: Decimal,
    /// Nitrogen index, kg/ha scale.
    pub nitrogen: Decimal,
    pub phosphorus: Decimal,
    pub potassium: Decimal,
    pub micronutrients: Micronutrients,
    pub texture: SoilTexture,
    /// Composite 0-100 health score.
    pub health_score: i32,
}

/// The assembled constant tables.
///
/// `new` indexes the rows by key; the `resolve_*` methods implement the
/// silent-default lookup contract.
#[derive(Debug, Clone)]
pub struct BaselineTables {
    crops: HashMap<String, CropBaseline>,
    costs: HashMap<String, CropCostRecord>,
    soil_factors: HashMap<String, Decimal>,
    soil_profiles: HashMap<String, SoilProfile>,
    default_crop: CropBaseline,
    default_cost: CropCostRecord,
    default_soil_profile: SoilProfile,
}

impl BaselineTables {
    pub fn new(
        crops: Vec<CropBaseline>,
        costs: Vec<CropCostRecord>,
        soil_factors: Vec<(String, Decimal)>,
        soil_profiles: Vec<SoilProfile>,
    ) -> Self {
        let crops: HashMap<_, _> = crops.into_iter().map(|c| (c.crop.clone(), c)).collect();
        let costs: HashMap<_, _> = costs.into_iter().map(|c| (c.crop.clone(), c)).collect();
        let soil_profiles: HashMap<_, _> = soil_profiles
            .into_iter()
            .map(|p| (p.soil.clone(), p))
            .collect();

        // The alluvial profile doubles as the fallback for unknown soils.
        let default_soil_profile = soil_profiles
            .get("alluvial")
            .cloned()
            .unwrap_or_else(Self::alluvial_reference_profile);

        Self {
            crops,
            costs,
            soil_factors: soil_factors.into_iter().collect(),
            soil_profiles,
            default_crop: CropBaseline::default_record(),
            default_cost: CropCostRecord::default_record(),
            default_soil_profile,
        }
    }

    /// Crop baseline for `key`, or the default record for unknown keys.
    pub fn resolve_crop(&self, key: &str) -> &CropBaseline {
        self.crops.get(key).unwrap_or_else(|| {
            debug!(crop = key, "no baseline for crop; using default record");
            &self.default_crop
        })
    }

    /// Cost record for `key`, or the default record for unknown keys.
    pub fn resolve_cost(&self, key: &str) -> &CropCostRecord {
        self.costs.get(key).unwrap_or_else(|| {
            debug!(crop = key, "no cost record for crop; using default record");
            &self.default_cost
        })
    }

    /// Water-retention factor for a soil key. Unknown soils get 1.0.
    pub fn resolve_soil_factor(&self, key: &str) -> Decimal {
        match self.soil_factors.get(key) {
            Some(factor) => *factor,
            None => {
                debug!(soil = key, "no retention factor for soil; using 1.0");
                Decimal::ONE
            }
        }
    }

    /// Soil profile for `key`; unknown soils resolve to the alluvial profile.
    pub fn resolve_soil_profile(&self, key: &str) -> &SoilProfile {
        self.soil_profiles.get(key).unwrap_or_else(|| {
            debug!(soil = key, "no profile for soil; using alluvial reference");
            &self.default_soil_profile
        })
    }

    pub fn has_crop(&self, key: &str) -> bool {
        self.crops.contains_key(key)
    }

    /// Known crop keys, sorted for stable listings.
    pub fn crop_keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.crops.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Built-in alluvial profile, used when the loaded tables are missing one.
    fn alluvial_reference_profile() -> SoilProfile {
        SoilProfile {
            soil: "alluvial".to_string(),
            ph: Decimal::new(72, 1),
            organic_matter_pct: Decimal::new(28, 1),
            nitrogen: Decimal::from(75),
            phosphorus: Decimal::from(65),
            potassium: Decimal::from(80),
            micronutrients: Micronutrients {
                zinc: Decimal::new(8, 1),
                iron: Decimal::new(45, 1),
                manganese: Decimal::new(21, 1),
                copper: Decimal::new(9, 1),
                boron: Decimal::new(6, 1),
            },
            texture: SoilTexture {
                sand: Decimal::from(40),
                silt: Decimal::from(40),
                clay: Decimal::from(20),
            },
            health_score: 85,
        }
    }
}
