//! Crop rotation advisory.
//!
//! Static sequence and benefit tables keyed by the current crop; crops
//! without a specific entry get the generic rotation.

use serde::Serialize;

/// All rotation plans run on the same cycle.
pub const ROTATION_TIMEFRAME: &str = "3-4 years rotation cycle";

/// Recommended rotation for a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationPlan {
    pub crop: String,
    /// Crop groups to rotate through, in order.
    pub sequence: Vec<&'static str>,
    pub benefits: Vec<&'static str>,
    pub timeframe: &'static str,
}

/// Builds the rotation plan for a crop key.
pub fn rotation_plan(crop: &str) -> RotationPlan {
    RotationPlan {
        crop: crop.to_string(),
        sequence: recommended_sequence(crop),
        benefits: rotation_benefits(crop),
        timeframe: ROTATION_TIMEFRAME,
    }
}

fn recommended_sequence(crop: &str) -> Vec<&'static str> {
    match crop {
        "rice" => vec!["legumes", "wheat", "maize", "vegetables"],
        "wheat" => vec!["legumes", "rice", "oilseeds", "vegetables"],
        "maize" => vec!["legumes", "wheat", "vegetables", "oilseeds"],
        "sugarcane" => vec!["legumes", "rice", "vegetables", "wheat"],
        "cotton" => vec!["legumes", "maize", "vegetables", "wheat"],
        "pulses" => vec!["wheat", "rice", "maize", "vegetables"],
        "groundnut" => vec!["wheat", "rice", "vegetables", "maize"],
        "soybean" => vec!["wheat", "rice", "maize", "vegetables"],
        "potato" => vec!["legumes", "maize", "wheat", "vegetables"],
        "onion" => vec!["legumes", "wheat", "maize", "vegetables"],
        "tomato" => vec!["legumes", "wheat", "maize", "vegetables"],
        _ => vec!["legumes", "cereals", "vegetables", "oilseeds"],
    }
}

fn rotation_benefits(crop: &str) -> Vec<&'static str> {
    match crop {
        "rice" => vec![
            "Breaks pest and disease cycles",
            "Improves soil fertility",
            "Reduces weed pressure",
            "Diversifies income sources",
        ],
        "wheat" => vec![
            "Reduces soil erosion",
            "Improves soil structure",
            "Breaks pest cycles",
            "Optimizes nutrient utilization",
        ],
        "maize" => vec![
            "Enhances soil organic matter",
            "Reduces pest pressure",
            "Improves water use efficiency",
            "Balances nutrient uptake",
        ],
        _ => vec![
            "Improves soil health and structure",
            "Reduces pest and disease pressure",
            "Optimizes nutrient utilization",
            "Increases overall farm productivity",
        ],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rice_rotates_into_legumes_first() {
        let plan = rotation_plan("rice");

        assert_eq!(plan.sequence, vec!["legumes", "wheat", "maize", "vegetables"]);
        assert_eq!(plan.benefits.len(), 4);
        assert_eq!(plan.timeframe, ROTATION_TIMEFRAME);
    }

    #[test]
    fn unknown_crop_gets_the_generic_rotation() {
        let plan = rotation_plan("quinoa");

        assert_eq!(
            plan.sequence,
            vec!["legumes", "cereals", "vegetables", "oilseeds"]
        );
        assert_eq!(plan.benefits[0], "Improves soil health and structure");
    }

    #[test]
    fn a_rotation_never_opens_with_the_current_crop() {
        for crop in ["rice", "wheat", "maize", "sugarcane", "cotton", "pulses"] {
            let plan = rotation_plan(crop);
            assert!(
                !plan.sequence.contains(&crop),
                "{crop} rotation must not repeat {crop}"
            );
        }
    }
}
