mod area;
mod assessment;
mod crop;
mod offline;
mod parameters;
mod soil;

pub use area::{Area, AreaUnit, ParseAreaUnitError};
pub use assessment::{FarmAssessment, NewFarmAssessment};
pub use crop::CropKind;
pub use offline::OfflineCrop;
pub use parameters::FarmParameters;
pub use soil::SoilKind;
