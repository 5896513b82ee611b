//! Water requirement and irrigation scheduling worksheet.
//!
//! The daily requirement is the crop's water demand scaled by the soil's
//! retention factor. The weekly balance compares effective rainfall (80% of
//! gross) against a week of demand; deficits classify into stress bands:
//! worse than −20 mm is high risk, any deficit is medium, otherwise low.
//!
//! The season schedule divides the growing season into weeks and applies a
//! growth-stage factor: 0.7 during establishment (first fifth of the season),
//! 1.2 through the main and flowering stages, 0.8 for ripening (after 70% of
//! the season). Irrigation frequency depends on the soil: sandy soils every
//! 2 days, clayey every 5, everything else every 3.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{round_dp1, round_dp2, round_whole};
use crate::models::Area;
use crate::tables::BaselineTables;

/// Errors that can occur while sizing irrigation runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaterWorksheetError {
    /// The land area must be positive.
    #[error("land area must be positive, got {0} ha")]
    InvalidArea(Decimal),

    /// The system flow rate must be positive.
    #[error("flow rate must be positive, got {0} l/min")]
    InvalidFlowRate(Decimal),
}

/// Water-stress risk band for the current rainfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressRisk {
    Low,
    Medium,
    High,
}

impl StressRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Irrigation delivery system, used for run sizing and savings estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationSystem {
    Drip,
    Sprinkler,
    Flood,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown irrigation system '{0}'")]
pub struct ParseIrrigationSystemError(String);

impl IrrigationSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drip => "drip",
            Self::Sprinkler => "sprinkler",
            Self::Flood => "flood",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drip" => Some(Self::Drip),
            "sprinkler" => Some(Self::Sprinkler),
            "flood" => Some(Self::Flood),
            _ => None,
        }
    }
}

impl std::str::FromStr for IrrigationSystem {
    type Err = ParseIrrigationSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseIrrigationSystemError(s.to_string()))
    }
}

/// One week of the irrigation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationWeek {
    pub week: u32,
    /// Water needed this week in mm, whole units.
    pub water_mm: Decimal,
    /// Days between irrigations.
    pub frequency_days: u32,
    /// Minutes per irrigation, whole units.
    pub duration_min: Decimal,
}

/// Season water plan for a crop on a soil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterPlan {
    pub crop: String,
    pub soil: String,

    /// Daily requirement in mm/day, one decimal place.
    pub daily_need_mm: Decimal,

    pub season_days: i32,

    /// Total season requirement in mm, whole units.
    pub season_need_mm: Decimal,

    /// Effective rainfall minus a week of demand, whole mm. Positive means
    /// surplus.
    pub weekly_balance_mm: Decimal,

    pub stress_risk: StressRisk,

    pub schedule: Vec<IrrigationWeek>,

    pub conservation_tips: Vec<&'static str>,
}

/// Sized irrigation run for a specific system and flow rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationRun {
    pub system: IrrigationSystem,
    /// Daily water volume in m³, two decimal places.
    pub water_m3: Decimal,
    /// Hours per day the system must run, two decimal places.
    pub run_hours: Decimal,
    /// Daily savings versus flood irrigation in m³, two decimal places.
    pub water_saved_m3: Decimal,
}

/// Calculator for the water management worksheet.
#[derive(Debug, Clone)]
pub struct WaterWorksheet<'a> {
    tables: &'a BaselineTables,
}

impl<'a> WaterWorksheet<'a> {
    pub fn new(tables: &'a BaselineTables) -> Self {
        Self { tables }
    }

    /// Builds the season water plan for a crop/soil pair at the given weekly
    /// rainfall. Unknown keys resolve to default baseline records.
    pub fn plan(
        &self,
        crop: &str,
        soil: &str,
        rainfall_mm: Decimal,
    ) -> WaterPlan {
        let baseline = self.tables.resolve_crop(crop);
        let soil_factor = self.tables.resolve_soil_factor(soil);

        let daily_need = baseline.water_need_mm_day * soil_factor;
        let season_days = baseline.season_days;
        let season_need = round_whole(daily_need * Decimal::from(season_days));

        // 80% of rainfall reaches the root zone.
        let effective_rainfall = rainfall_mm * Decimal::new(8, 1);
        let weekly_balance = effective_rainfall - daily_need * Decimal::from(7);

        let stress_risk = Self::classify_stress(weekly_balance);
        let schedule = Self::schedule(daily_need, season_days, soil);
        let conservation_tips = Self::conservation_tips(crop, soil);

        WaterPlan {
            crop: crop.to_string(),
            soil: soil.to_string(),
            daily_need_mm: round_dp1(daily_need),
            season_days,
            season_need_mm: season_need,
            weekly_balance_mm: round_whole(weekly_balance),
            stress_risk,
            schedule,
            conservation_tips,
        }
    }

    /// Sizes the daily irrigation run from the plan's rounded requirement.
    ///
    /// # Errors
    ///
    /// Rejects non-positive areas and flow rates.
    pub fn irrigation_run(
        &self,
        plan: &WaterPlan,
        area: Area,
        system: IrrigationSystem,
        flow_rate_l_min: Decimal,
    ) -> Result<IrrigationRun, WaterWorksheetError> {
        let area_ha = area.to_hectares();
        if area_ha <= Decimal::ZERO {
            return Err(WaterWorksheetError::InvalidArea(area_ha));
        }
        if flow_rate_l_min <= Decimal::ZERO {
            return Err(WaterWorksheetError::InvalidFlowRate(flow_rate_l_min));
        }

        let square_meters = area.square_meters();

        // 1 mm over 1 m² is 1 liter; divide by 1000 for m³.
        let water_m3 = plan.daily_need_mm * square_meters / Decimal::from(1000);
        let run_hours = water_m3 * Decimal::from(1000) / (flow_rate_l_min * Decimal::from(60));

        // Flood irrigation is taken as 1.5× the requirement; sprinklers lose
        // 20% to evaporation and drift.
        let conventional_m3 =
            plan.daily_need_mm * Decimal::new(15, 1) * square_meters / Decimal::from(1000);
        let water_saved_m3 = match system {
            IrrigationSystem::Drip => conventional_m3 - water_m3,
            IrrigationSystem::Sprinkler => conventional_m3 - water_m3 * Decimal::new(12, 1),
            IrrigationSystem::Flood => Decimal::ZERO,
        };

        Ok(IrrigationRun {
            system,
            water_m3: round_dp2(water_m3),
            run_hours: round_dp2(run_hours),
            water_saved_m3: round_dp2(water_saved_m3),
        })
    }

    /// Deficits worse than −20 mm/week are high risk; any deficit is medium.
    /// A balance of exactly −20 is still medium, exactly 0 is low.
    pub fn classify_stress(weekly_balance_mm: Decimal) -> StressRisk {
        if weekly_balance_mm < Decimal::from(-20) {
            StressRisk::High
        } else if weekly_balance_mm < Decimal::ZERO {
            StressRisk::Medium
        } else {
            StressRisk::Low
        }
    }

    fn schedule(
        daily_need: Decimal,
        season_days: i32,
        soil: &str,
    ) -> Vec<IrrigationWeek> {
        let weeks = (season_days.max(0) as u32).div_ceil(7);
        let total_weeks = Decimal::from(weeks);
        let frequency_days: u32 = match soil {
            "sandy" => 2,
            "clayey" => 5,
            _ => 3,
        };

        (1..=weeks)
            .map(|week| {
                let position = Decimal::from(week);
                let stage_factor = if position < total_weeks * Decimal::new(2, 1) {
                    Decimal::new(7, 1)
                } else if position > total_weeks * Decimal::new(7, 1) {
                    Decimal::new(8, 1)
                } else {
                    Decimal::new(12, 1)
                };

                let weekly_need = daily_need * Decimal::from(7) * stage_factor;
                let duration_min =
                    round_whole(weekly_need / Decimal::from(frequency_days) * Decimal::from(10));

                IrrigationWeek {
                    week,
                    water_mm: round_whole(weekly_need),
                    frequency_days,
                    duration_min,
                }
            })
            .collect()
    }

    fn conservation_tips(
        crop: &str,
        soil: &str,
    ) -> Vec<&'static str> {
        let mut tips = vec![
            "Apply mulch around plants to reduce evaporation from soil",
            "Irrigate during early morning or evening to reduce evaporation losses",
            "Maintain your irrigation system to prevent leaks and ensure uniform water application",
        ];

        match soil {
            "sandy" => {
                tips.push("Consider adding organic matter to improve water retention in sandy soil")
            }
            "clayey" => {
                tips.push("Avoid overwatering clay soils to prevent waterlogging and root diseases")
            }
            "alluvial" => tips
                .push("Implement contour farming to maximize water utilization in alluvial soils"),
            "red" => tips.push("Use drip irrigation for efficient water use in red soils"),
            _ => {}
        }

        match crop {
            "rice" => tips.push(
                "Consider alternate wetting and drying technique to reduce water use in rice cultivation",
            ),
            "wheat" => tips.push(
                "Schedule irrigation at critical growth stages like crown root initiation, flowering, and grain filling",
            ),
            "sugarcane" => {
                tips.push("Use trash mulching to conserve soil moisture in sugarcane fields")
            }
            "cotton" => tips.push(
                "Implement deficit irrigation during vegetative growth to promote deeper root development",
            ),
            _ => {}
        }

        tips
    }
}
