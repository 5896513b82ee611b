//! One module per advisory worksheet.
//!
//! Worksheets follow the same lookup-and-scale contract: resolve the
//! baseline record for a categorical key (falling back to the default record
//! for unknown keys), scale by the normalized area, and classify derived
//! metrics into qualitative bands with strict-greater-than cutoffs.

pub mod cost;
pub mod market;
pub mod pest_risk;
pub mod rotation;
pub mod soil_health;
pub mod water;
pub mod yield_estimate;
