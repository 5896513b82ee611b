//! Advisory calculation modules.
//!
//! Each worksheet is a pure function of the user's [`crate::FarmParameters`]
//! and the read-only [`crate::BaselineTables`]: resolve baseline constants,
//! scale by area, derive totals and ratios, and bucket the results into
//! qualitative bands.

pub mod common;
pub mod worksheets;

pub use worksheets::cost::{
    CostBreakdown, CostComponents, CostWorksheet, CostWorksheetError, PerformanceBand,
    Profitability, ProfitOutcome, YieldSafety,
};
pub use worksheets::market::{MarketWorksheet, MarketWorksheetError, PriceOutlook, PriceTrend};
pub use worksheets::pest_risk::{PestRiskProfile, RiskLevel, ThreatRecord, pest_risk_profile};
pub use worksheets::rotation::{RotationPlan, rotation_plan};
pub use worksheets::soil_health::{
    HealthBand, Nutrient, NutrientStatus, SoilHealthReport, SoilHealthWorksheet,
};
pub use worksheets::water::{
    IrrigationRun, IrrigationSystem, IrrigationWeek, StressRisk, WaterPlan, WaterWorksheet,
    WaterWorksheetError,
};
pub use worksheets::yield_estimate::{
    YieldCategory, YieldEstimate, YieldWorksheet, YieldWorksheetError,
};
