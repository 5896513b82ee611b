//! Soil health assessment worksheet.
//!
//! Looks up the reference profile for a soil type (unknown soils assess as
//! alluvial), classifies the macro nutrients and organic matter against fixed
//! optimal ranges, bands the composite health score, and emits amendment
//! recommendations.
//!
//! Optimal ranges (inclusive on both ends):
//!
//! | Metric         | Low below | High above |
//! |----------------|-----------|------------|
//! | nitrogen       | 50        | 70         |
//! | phosphorus     | 40        | 60         |
//! | potassium      | 60        | 80         |
//! | organic matter | 1.5       | 2.5        |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tables::{BaselineTables, SoilProfile};

/// Nutrient metrics with classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
    OrganicMatter,
}

impl Nutrient {
    /// Inclusive (low, high) bounds of the optimal range.
    pub fn optimal_range(&self) -> (Decimal, Decimal) {
        match self {
            Self::Nitrogen => (Decimal::from(50), Decimal::from(70)),
            Self::Phosphorus => (Decimal::from(40), Decimal::from(60)),
            Self::Potassium => (Decimal::from(60), Decimal::from(80)),
            Self::OrganicMatter => (Decimal::new(15, 1), Decimal::new(25, 1)),
        }
    }
}

/// Classification of a nutrient level against its optimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NutrientStatus {
    Low,
    Optimal,
    High,
}

impl NutrientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Optimal => "optimal",
            Self::High => "high",
        }
    }
}

/// Banding of the composite 0-100 health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthBand {
    Poor,
    Fair,
    Good,
}

impl HealthBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
        }
    }
}

/// Full soil health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilHealthReport {
    /// The soil key that was asked about (which may be unknown).
    pub soil: String,
    /// The profile the assessment ran against.
    pub profile: SoilProfile,
    pub nitrogen_status: NutrientStatus,
    pub phosphorus_status: NutrientStatus,
    pub potassium_status: NutrientStatus,
    pub organic_matter_status: NutrientStatus,
    pub health_band: HealthBand,
    pub recommendations: Vec<String>,
}

/// Calculator for the soil health worksheet.
#[derive(Debug, Clone)]
pub struct SoilHealthWorksheet<'a> {
    tables: &'a BaselineTables,
}

impl<'a> SoilHealthWorksheet<'a> {
    pub fn new(tables: &'a BaselineTables) -> Self {
        Self { tables }
    }

    pub fn assess(&self, soil: &str) -> SoilHealthReport {
        let profile = self.tables.resolve_soil_profile(soil).clone();

        let report = SoilHealthReport {
            soil: soil.to_string(),
            nitrogen_status: Self::nutrient_status(profile.nitrogen, Nutrient::Nitrogen),
            phosphorus_status: Self::nutrient_status(profile.phosphorus, Nutrient::Phosphorus),
            potassium_status: Self::nutrient_status(profile.potassium, Nutrient::Potassium),
            organic_matter_status: Self::nutrient_status(
                profile.organic_matter_pct,
                Nutrient::OrganicMatter,
            ),
            health_band: Self::health_band(profile.health_score),
            recommendations: Self::recommendations(&profile, soil),
            profile,
        };

        report
    }

    /// Values inside the optimal range (inclusive) are optimal; outside they
    /// classify low or high.
    pub fn nutrient_status(
        value: Decimal,
        nutrient: Nutrient,
    ) -> NutrientStatus {
        let (low, high) = nutrient.optimal_range();
        if value < low {
            NutrientStatus::Low
        } else if value > high {
            NutrientStatus::High
        } else {
            NutrientStatus::Optimal
        }
    }

    /// Scores of 80 and above are good, 60 and above fair, the rest poor.
    pub fn health_band(score: i32) -> HealthBand {
        if score >= 80 {
            HealthBand::Good
        } else if score >= 60 {
            HealthBand::Fair
        } else {
            HealthBand::Poor
        }
    }

    fn recommendations(
        profile: &SoilProfile,
        soil: &str,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if profile.ph > Decimal::new(75, 1) {
            recommendations.push("Apply sulfur or gypsum to reduce soil pH".to_string());
        } else if profile.ph < Decimal::new(65, 1) {
            recommendations.push("Apply agricultural lime to increase soil pH".to_string());
        }

        if profile.organic_matter_pct < Decimal::new(20, 1) {
            recommendations
                .push("Incorporate organic matter through compost or green manure".to_string());
        }

        if profile.nitrogen < Decimal::from(60) {
            recommendations.push(
                "Apply nitrogen fertilizer or grow nitrogen-fixing cover crops".to_string(),
            );
        }

        if profile.phosphorus < Decimal::from(50) {
            recommendations.push("Apply phosphorus fertilizer or bone meal".to_string());
        }

        if profile.potassium < Decimal::from(60) {
            recommendations.push("Apply potassium fertilizer or wood ash".to_string());
        }

        // Texture advice keys off the requested soil type, not the resolved
        // profile, so unknown soils get no texture-specific line.
        match soil {
            "sandy" => recommendations
                .push("Improve water retention by adding organic matter".to_string()),
            "clayey" => recommendations.push(
                "Improve drainage and aeration through tillage and organic amendments".to_string(),
            ),
            _ => {}
        }

        if recommendations.is_empty() {
            recommendations
                .push("Your soil is in good condition for the selected crop".to_string());
        }

        recommendations
    }
}
