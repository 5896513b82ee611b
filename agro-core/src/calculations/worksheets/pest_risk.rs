//! Pest and disease risk advisory.
//!
//! Static per-crop threat tables with a generic fallback profile for crops
//! that have no specific records yet.

use serde::{Deserialize, Serialize};

/// Risk level of a single pest or disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One pest or disease entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreatRecord {
    pub name: &'static str,
    pub risk: RiskLevel,
    pub symptoms: &'static str,
    pub management: &'static str,
}

/// Pest and disease outlook for one crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PestRiskProfile {
    pub crop: String,
    pub pests: Vec<ThreatRecord>,
    pub diseases: Vec<ThreatRecord>,
    pub alerts: Vec<&'static str>,
}

impl PestRiskProfile {
    /// Highest risk level across all pests and diseases.
    pub fn peak_risk(&self) -> Option<RiskLevel> {
        self.pests
            .iter()
            .chain(self.diseases.iter())
            .map(|t| t.risk)
            .max()
    }
}

/// Builds the risk profile for a crop key.
pub fn pest_risk_profile(crop: &str) -> PestRiskProfile {
    let (pests, diseases, alerts) = match crop {
        "rice" => (
            vec![
                ThreatRecord {
                    name: "Rice Stem Borer",
                    risk: RiskLevel::High,
                    symptoms: "Dead hearts in vegetative stage, white heads in reproductive stage",
                    management: "Use resistant varieties, balanced fertilization, proper water management",
                },
                ThreatRecord {
                    name: "Brown Planthopper",
                    risk: RiskLevel::Medium,
                    symptoms: "Yellowing and drying of leaves, honeydew secretion",
                    management: "Avoid excessive nitrogen, maintain field sanitation, use resistant varieties",
                },
            ],
            vec![
                ThreatRecord {
                    name: "Rice Blast",
                    risk: RiskLevel::High,
                    symptoms: "Diamond-shaped lesions on leaves, neck blast on panicles",
                    management: "Use resistant varieties, fungicide application, balanced fertilization",
                },
                ThreatRecord {
                    name: "Bacterial Leaf Blight",
                    risk: RiskLevel::Medium,
                    symptoms: "Water-soaked lesions on leaf margins, yellowing and drying of leaves",
                    management: "Use resistant varieties, avoid excessive nitrogen, proper spacing",
                },
            ],
            vec![
                "High risk of Rice Blast due to recent rainfall patterns",
                "Monitor for Brown Planthopper in the next 2 weeks",
            ],
        ),
        "wheat" => (
            vec![
                ThreatRecord {
                    name: "Aphids",
                    risk: RiskLevel::Medium,
                    symptoms: "Curling of leaves, stunted growth, honeydew secretion",
                    management: "Early sowing, balanced fertilization, natural enemies conservation",
                },
                ThreatRecord {
                    name: "Termites",
                    risk: RiskLevel::Low,
                    symptoms: "Wilting of plants, hollow stems, poor germination",
                    management: "Soil treatment, adequate irrigation, removal of crop residues",
                },
            ],
            vec![
                ThreatRecord {
                    name: "Wheat Rust",
                    risk: RiskLevel::High,
                    symptoms: "Reddish-brown pustules on leaves and stems",
                    management: "Use resistant varieties, fungicide application, early sowing",
                },
                ThreatRecord {
                    name: "Powdery Mildew",
                    risk: RiskLevel::Medium,
                    symptoms: "White powdery growth on leaves, stems and heads",
                    management: "Use resistant varieties, fungicide application, proper spacing",
                },
            ],
            vec![
                "Wheat Rust outbreak reported in neighboring regions",
                "Favorable conditions for Powdery Mildew development",
            ],
        ),
        "maize" => (
            vec![
                ThreatRecord {
                    name: "Fall Armyworm",
                    risk: RiskLevel::High,
                    symptoms: "Ragged feeding damage on leaves, frass in whorls",
                    management: "Early detection, biological control, targeted insecticide application",
                },
                ThreatRecord {
                    name: "Corn Earworm",
                    risk: RiskLevel::Medium,
                    symptoms: "Feeding damage on ear tips, presence of larvae in ears",
                    management: "Timely planting, biological control, resistant varieties",
                },
            ],
            vec![
                ThreatRecord {
                    name: "Northern Corn Leaf Blight",
                    risk: RiskLevel::Medium,
                    symptoms: "Long, elliptical gray-green lesions on leaves",
                    management: "Crop rotation, resistant varieties, fungicide application",
                },
                ThreatRecord {
                    name: "Common Rust",
                    risk: RiskLevel::Low,
                    symptoms: "Small, circular to elongate, reddish-brown pustules on leaves",
                    management: "Resistant varieties, fungicide application, early planting",
                },
            ],
            vec![
                "Fall Armyworm migration expected in the next 10 days",
                "Monitor for early signs of Northern Corn Leaf Blight",
            ],
        ),
        _ => (
            vec![
                ThreatRecord {
                    name: "Generic Pest 1",
                    risk: RiskLevel::Medium,
                    symptoms: "Leaf damage, stunted growth",
                    management: "Integrated pest management, crop rotation",
                },
                ThreatRecord {
                    name: "Generic Pest 2",
                    risk: RiskLevel::Low,
                    symptoms: "Feeding damage on plant parts",
                    management: "Biological control, proper field sanitation",
                },
            ],
            vec![
                ThreatRecord {
                    name: "Generic Disease 1",
                    risk: RiskLevel::Medium,
                    symptoms: "Leaf spots, wilting",
                    management: "Resistant varieties, fungicide application",
                },
                ThreatRecord {
                    name: "Generic Disease 2",
                    risk: RiskLevel::Low,
                    symptoms: "Discoloration, stunted growth",
                    management: "Crop rotation, proper spacing, balanced fertilization",
                },
            ],
            vec!["Monitor for common pests and diseases in your region"],
        ),
    };

    PestRiskProfile {
        crop: crop.to_string(),
        pests,
        diseases,
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rice_profile_has_specific_threats() {
        let profile = pest_risk_profile("rice");

        assert_eq!(profile.pests[0].name, "Rice Stem Borer");
        assert_eq!(profile.pests[0].risk, RiskLevel::High);
        assert_eq!(profile.diseases[0].name, "Rice Blast");
        assert_eq!(profile.alerts.len(), 2);
        assert_eq!(profile.peak_risk(), Some(RiskLevel::High));
    }

    #[test]
    fn unknown_crop_gets_the_generic_profile() {
        let profile = pest_risk_profile("quinoa");

        assert_eq!(profile.crop, "quinoa");
        assert_eq!(profile.pests[0].name, "Generic Pest 1");
        assert_eq!(profile.peak_risk(), Some(RiskLevel::Medium));
        assert_eq!(
            profile.alerts,
            vec!["Monitor for common pests and diseases in your region"]
        );
    }

    #[test]
    fn every_specific_profile_lists_two_pests_and_two_diseases() {
        for crop in ["rice", "wheat", "maize"] {
            let profile = pest_risk_profile(crop);
            assert_eq!(profile.pests.len(), 2, "{crop}");
            assert_eq!(profile.diseases.len(), 2, "{crop}");
        }
    }
}
