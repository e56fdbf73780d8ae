pub mod catalog;
pub mod cost;

pub use catalog::{PriceCatalog, PriceCatalogEntry};
pub use cost::CostCalculator;
