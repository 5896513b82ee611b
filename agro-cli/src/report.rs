//! Plain-text rendering of worksheet results.

use agro_core::calculations::{
    CostBreakdown, CostWorksheet, IrrigationRun, PestRiskProfile, PriceOutlook, RotationPlan,
    SoilHealthReport, WaterPlan, YieldEstimate,
};
use agro_core::models::{FarmAssessment, OfflineCrop};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

fn opt(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn heading(title: &str) {
    println!();
    println!("== {title} ==");
}

pub fn render_yield(estimate: &YieldEstimate) {
    heading("Yield estimate");
    println!(
        "Crop: {} (baseline {} t/ha)",
        estimate.crop, estimate.base_yield_t_ha
    );
    println!(
        "Factors: fertilizer {} | rainfall {} | temperature {} | humidity {} | sunlight {}",
        estimate.fertilizer_factor,
        estimate.rainfall_factor,
        estimate.temperature_factor,
        estimate.humidity_factor,
        estimate.sunlight_factor,
    );
    println!(
        "Estimated yield: {} t/ha ({} t total) - {}",
        estimate.estimated_yield_t_ha,
        estimate.total_yield_t,
        estimate.category.as_str()
    );
    println!("Suggestions:");
    for suggestion in &estimate.suggestions {
        println!("  - {suggestion}");
    }
}

pub fn render_cost(breakdown: &CostBreakdown) {
    heading("Cost breakdown");
    println!(
        "Crop: {} over {} ha (market price {} per ton)",
        breakdown.crop, breakdown.area_ha, breakdown.market_price
    );
    let c = &breakdown.components;
    println!("  Seeds        {:>10}", c.seeds);
    println!("  Fertilizers  {:>10}", c.fertilizers);
    println!("  Pesticides   {:>10}", c.pesticides);
    println!("  Irrigation   {:>10}", c.irrigation);
    println!("  Labor        {:>10}", c.labor);
    println!("  Machinery    {:>10}", c.machinery);
    println!("  Others       {:>10}", c.others);
    println!("  Total        {:>10}", breakdown.total_cost);

    let p = &breakdown.profitability;
    println!(
        "Expected yield {} t -> gross {} | net {} ({})",
        breakdown.expected_yield_t,
        p.gross_income,
        p.net_profit,
        p.outcome.as_str()
    );
    println!(
        "Profit margin {}% ({}) | ROI {}% ({}) | break-even {} t ({})",
        p.profit_margin_pct,
        p.margin_band.as_str(),
        p.roi_pct,
        p.roi_band.as_str(),
        p.break_even_yield_t,
        p.yield_safety.as_str()
    );
    println!("Recommendations:");
    for recommendation in CostWorksheet::recommendations(breakdown) {
        println!("  - {recommendation}");
    }
}

pub fn render_water(
    plan: &WaterPlan,
    run: Option<&IrrigationRun>,
    max_weeks: usize,
) {
    heading("Water management");
    println!(
        "Crop: {} on {} soil - {} mm/day, {} mm over a {}-day season",
        plan.crop, plan.soil, plan.daily_need_mm, plan.season_need_mm, plan.season_days
    );
    println!(
        "Weekly balance: {} mm - water stress risk {}",
        plan.weekly_balance_mm,
        plan.stress_risk.as_str()
    );

    if let Some(run) = run {
        println!(
            "Irrigation run ({}): {} m3/day over {} h, saving {} m3 vs flood",
            run.system.as_str(),
            run.water_m3,
            run.run_hours,
            run.water_saved_m3
        );
    }

    println!("Schedule (first {max_weeks} weeks):");
    println!("  week  water(mm)  every(days)  duration(min)");
    for week in plan.schedule.iter().take(max_weeks) {
        println!(
            "  {:>4}  {:>9}  {:>11}  {:>13}",
            week.week, week.water_mm, week.frequency_days, week.duration_min
        );
    }
    if plan.schedule.len() > max_weeks {
        println!("  ... {} more weeks", plan.schedule.len() - max_weeks);
    }

    println!("Conservation tips:");
    for tip in &plan.conservation_tips {
        println!("  - {tip}");
    }
}

pub fn render_soil(report: &SoilHealthReport) {
    heading("Soil health");
    let profile = &report.profile;
    if report.soil != profile.soil {
        println!(
            "No profile for '{}' soil; showing the {} reference profile",
            report.soil, profile.soil
        );
    }
    println!(
        "Soil: {} - health score {} ({})",
        profile.soil,
        profile.health_score,
        report.health_band.as_str()
    );
    println!("pH {} | organic matter {}%", profile.ph, profile.organic_matter_pct);
    println!(
        "Nitrogen {} ({}) | Phosphorus {} ({}) | Potassium {} ({}) | Organic matter ({})",
        profile.nitrogen,
        report.nitrogen_status.as_str(),
        profile.phosphorus,
        report.phosphorus_status.as_str(),
        profile.potassium,
        report.potassium_status.as_str(),
        report.organic_matter_status.as_str()
    );
    println!(
        "Texture: {}% sand / {}% silt / {}% clay",
        profile.texture.sand, profile.texture.silt, profile.texture.clay
    );
    println!("Recommendations:");
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }
}

pub fn render_rotation(plan: &RotationPlan) {
    heading("Crop rotation");
    println!("After {}: {}", plan.crop, plan.sequence.join(" -> "));
    println!("Timeframe: {}", plan.timeframe);
    println!("Benefits:");
    for benefit in &plan.benefits {
        println!("  - {benefit}");
    }
}

pub fn render_pests(profile: &PestRiskProfile) {
    heading("Pest and disease risk");
    println!("Crop: {}", profile.crop);
    println!("Pests:");
    for pest in &profile.pests {
        println!("  - {} [{}]", pest.name, pest.risk.as_str());
        println!("    symptoms: {}", pest.symptoms);
        println!("    management: {}", pest.management);
    }
    println!("Diseases:");
    for disease in &profile.diseases {
        println!("  - {} [{}]", disease.name, disease.risk.as_str());
        println!("    symptoms: {}", disease.symptoms);
        println!("    management: {}", disease.management);
    }
    println!("Alerts:");
    for alert in &profile.alerts {
        println!("  ! {alert}");
    }
}

pub fn render_market(outlook: &PriceOutlook) {
    heading("Market outlook");
    println!(
        "Crop: {} - reference {} per ton, observed {}",
        outlook.crop, outlook.reference_price, outlook.observed_price
    );
    println!(
        "Change: {}% - {}",
        outlook.change_pct,
        outlook.trend.as_str()
    );
}

pub fn render_assessments(assessments: &[FarmAssessment]) {
    heading("Saved assessments");
    if assessments.is_empty() {
        println!("No saved assessments.");
        return;
    }
    for a in assessments {
        println!(
            "#{} {} on {} soil, {} ha - yield {} t, cost {}, net {} ({})",
            a.id,
            a.crop,
            a.soil,
            a.area_ha,
            opt(a.estimated_yield_t),
            opt(a.total_cost),
            opt(a.net_profit),
            a.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
}

pub fn render_offline(
    crops: &[OfflineCrop],
    last_synced: Option<DateTime<Utc>>,
) {
    heading("Offline data");
    if crops.is_empty() {
        println!("No crop data downloaded.");
    } else {
        for crop in crops {
            println!(
                "  {} - {} MB (downloaded {})",
                crop.crop,
                crop.size_mb,
                crop.downloaded_at.format("%Y-%m-%d %H:%M")
            );
        }
    }
    match last_synced {
        Some(when) => println!("Last synced: {}", when.format("%Y-%m-%d %H:%M")),
        None => println!("Never synced."),
    }
}
