use serde::{Deserialize, Serialize};

/// Crops the advisory tables ship baseline data for.
///
/// Calculations accept free-form crop keys and fall back to default baseline
/// records for anything unrecognized; this enum exists for surfaces that need
/// the known list (pickers, `crops` listing, download validation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropKind {
    Rice,
    Wheat,
    Maize,
    Sugarcane,
    Cotton,
    Jute,
    Pulses,
    Groundnut,
    Soybean,
    Mustard,
    Sunflower,
    Potato,
    Onion,
    Tomato,
    Chilli,
    Turmeric,
    Ginger,
    Banana,
    Mango,
    Coconut,
}

impl CropKind {
    pub const ALL: [CropKind; 20] = [
        Self::Rice,
        Self::Wheat,
        Self::Maize,
        Self::Sugarcane,
        Self::Cotton,
        Self::Jute,
        Self::Pulses,
        Self::Groundnut,
        Self::Soybean,
        Self::Mustard,
        Self::Sunflower,
        Self::Potato,
        Self::Onion,
        Self::Tomato,
        Self::Chilli,
        Self::Turmeric,
        Self::Ginger,
        Self::Banana,
        Self::Mango,
        Self::Coconut,
    ];

    /// Lowercase key used in baseline tables and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rice => "rice",
            Self::Wheat => "wheat",
            Self::Maize => "maize",
            Self::Sugarcane => "sugarcane",
            Self::Cotton => "cotton",
            Self::Jute => "jute",
            Self::Pulses => "pulses",
            Self::Groundnut => "groundnut",
            Self::Soybean => "soybean",
            Self::Mustard => "mustard",
            Self::Sunflower => "sunflower",
            Self::Potato => "potato",
            Self::Onion => "onion",
            Self::Tomato => "tomato",
            Self::Chilli => "chilli",
            Self::Turmeric => "turmeric",
            Self::Ginger => "ginger",
            Self::Banana => "banana",
            Self::Mango => "mango",
            Self::Coconut => "coconut",
        }
    }

    /// Human-facing label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rice => "Rice (Paddy)",
            Self::Wheat => "Wheat",
            Self::Maize => "Maize (Corn)",
            Self::Sugarcane => "Sugarcane",
            Self::Cotton => "Cotton",
            Self::Jute => "Jute",
            Self::Pulses => "Pulses",
            Self::Groundnut => "Groundnut",
            Self::Soybean => "Soybean",
            Self::Mustard => "Mustard",
            Self::Sunflower => "Sunflower",
            Self::Potato => "Potato",
            Self::Onion => "Onion",
            Self::Tomato => "Tomato",
            Self::Chilli => "Chilli",
            Self::Turmeric => "Turmeric",
            Self::Ginger => "Ginger",
            Self::Banana => "Banana",
            Self::Mango => "Mango",
            Self::Coconut => "Coconut",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_known_crop() {
        for crop in CropKind::ALL {
            assert_eq!(CropKind::parse(crop.as_str()), Some(crop));
        }
    }

    #[test]
    fn parse_rejects_unknown_key() {
        assert_eq!(CropKind::parse("quinoa"), None);
    }

    #[test]
    fn keys_are_lowercase() {
        for crop in CropKind::ALL {
            assert_eq!(crop.as_str(), crop.as_str().to_lowercase());
        }
    }
}
