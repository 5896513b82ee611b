use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted advisory run: the parameters that went in and the headline
/// figures that came out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmAssessment {
    pub id: i64,

    // Inputs
    pub crop: String,
    pub soil: String,
    pub area_ha: Decimal,
    pub fertilizer_kg_ha: Decimal,
    pub rainfall_mm: Decimal,
    pub temperature_c: Decimal,
    pub humidity_pct: Decimal,
    pub sunlight_hours: Decimal,

    // Headline derived values
    pub estimated_yield_t: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub water_daily_mm: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new assessments (no id or timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFarmAssessment {
    pub crop: String,
    pub soil: String,
    pub area_ha: Decimal,
    pub fertilizer_kg_ha: Decimal,
    pub rainfall_mm: Decimal,
    pub temperature_c: Decimal,
    pub humidity_pct: Decimal,
    pub sunlight_hours: Decimal,
    pub estimated_yield_t: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub net_profit: Option<Decimal>,
    pub water_daily_mm: Option<Decimal>,
}
