//! Land area with unit normalization.
//!
//! All baseline constants are stated per hectare, so every calculation starts
//! by normalizing the user-entered area to hectares. The conversion factor is
//! fixed at 0.404686 hectares per acre.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unit the land area was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Hectares,
    Acres,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown area unit '{0}'")]
pub struct ParseAreaUnitError(String);

impl AreaUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hectares => "hectares",
            Self::Acres => "acres",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hectares" | "ha" => Some(Self::Hectares),
            "acres" | "ac" => Some(Self::Acres),
            _ => None,
        }
    }
}

impl std::str::FromStr for AreaUnit {
    type Err = ParseAreaUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseAreaUnitError(s.to_string()))
    }
}

/// A land area measurement.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use agro_core::models::{Area, AreaUnit};
///
/// let field = Area::new(dec!(5), AreaUnit::Acres);
/// assert_eq!(field.to_hectares(), dec!(2.023430));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub value: Decimal,
    pub unit: AreaUnit,
}

impl Area {
    /// Hectares per acre.
    fn acre_factor() -> Decimal {
        Decimal::new(404_686, 6)
    }

    pub fn new(value: Decimal, unit: AreaUnit) -> Self {
        Self { value, unit }
    }

    pub fn hectares(value: Decimal) -> Self {
        Self::new(value, AreaUnit::Hectares)
    }

    pub fn acres(value: Decimal) -> Self {
        Self::new(value, AreaUnit::Acres)
    }

    /// Normalized value in hectares.
    pub fn to_hectares(&self) -> Decimal {
        match self.unit {
            AreaUnit::Hectares => self.value,
            AreaUnit::Acres => self.value * Self::acre_factor(),
        }
    }

    /// Value expressed in acres.
    pub fn to_acres(&self) -> Decimal {
        match self.unit {
            AreaUnit::Acres => self.value,
            AreaUnit::Hectares => self.value / Self::acre_factor(),
        }
    }

    /// Area in square meters (1 ha = 10,000 m²), used for irrigation volumes.
    pub fn square_meters(&self) -> Decimal {
        self.to_hectares() * Decimal::from(10_000)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn hectares_pass_through_unchanged() {
        let area = Area::hectares(dec!(2.5));

        assert_eq!(area.to_hectares(), dec!(2.5));
    }

    #[test]
    fn acres_convert_with_fixed_factor() {
        let area = Area::acres(dec!(1));

        assert_eq!(area.to_hectares(), dec!(0.404686));
    }

    #[test]
    fn one_acre_is_4046_86_square_meters() {
        let area = Area::acres(dec!(1));

        assert_eq!(area.square_meters(), dec!(4046.860000));
    }

    #[test]
    fn round_trip_acres_to_hectares_and_back() {
        let original = dec!(3.7);
        let as_hectares = Area::acres(original).to_hectares();
        let back = Area::hectares(as_hectares).to_acres();

        // Division is not exact; agree to 6 decimal places.
        assert_eq!(back.round_dp(6), original.round_dp(6));
    }

    #[test]
    fn round_trip_hectares_to_acres_and_back() {
        let original = dec!(12.25);
        let as_acres = Area::hectares(original).to_acres();
        let back = Area::acres(as_acres).to_hectares();

        assert_eq!(back.round_dp(6), original.round_dp(6));
    }

    #[test]
    fn unit_parse_accepts_short_forms() {
        assert_eq!(AreaUnit::parse("ha"), Some(AreaUnit::Hectares));
        assert_eq!(AreaUnit::parse("ac"), Some(AreaUnit::Acres));
        assert_eq!(AreaUnit::parse("hectares"), Some(AreaUnit::Hectares));
        assert_eq!(AreaUnit::parse("acres"), Some(AreaUnit::Acres));
        assert_eq!(AreaUnit::parse("sqft"), None);
    }
}
