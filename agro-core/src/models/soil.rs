use serde::{Deserialize, Serialize};

/// Soil types offered by the parameter form.
///
/// As with crops, calculations accept free-form soil keys; unrecognized keys
/// resolve to default retention factors and the alluvial reference profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilKind {
    Alluvial,
    Black,
    Red,
    Laterite,
    Arid,
    Forest,
    Saline,
    Peaty,
    Sandy,
    Clayey,
}

impl SoilKind {
    pub const ALL: [SoilKind; 10] = [
        Self::Alluvial,
        Self::Black,
        Self::Red,
        Self::Laterite,
        Self::Arid,
        Self::Forest,
        Self::Saline,
        Self::Peaty,
        Self::Sandy,
        Self::Clayey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alluvial => "alluvial",
            Self::Black => "black",
            Self::Red => "red",
            Self::Laterite => "laterite",
            Self::Arid => "arid",
            Self::Forest => "forest",
            Self::Saline => "saline",
            Self::Peaty => "peaty",
            Self::Sandy => "sandy",
            Self::Clayey => "clayey",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Alluvial => "Alluvial Soil",
            Self::Black => "Black Soil",
            Self::Red => "Red Soil",
            Self::Laterite => "Laterite Soil",
            Self::Arid => "Arid Soil",
            Self::Forest => "Forest Soil",
            Self::Saline => "Saline Soil",
            Self::Peaty => "Peaty Soil",
            Self::Sandy => "Sandy Soil",
            Self::Clayey => "Clayey Soil",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_known_soil() {
        for soil in SoilKind::ALL {
            assert_eq!(SoilKind::parse(soil.as_str()), Some(soil));
        }
    }

    #[test]
    fn parse_rejects_unknown_key() {
        assert_eq!(SoilKind::parse("volcanic"), None);
    }
}
