pub mod calculations;
pub mod db;
pub mod models;
pub mod tables;

pub use db::repository::{FarmRepository, RepositoryError};
pub use models::*;
pub use tables::{BaselineTables, CropBaseline, CropCostRecord, SoilProfile};
