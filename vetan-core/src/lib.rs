pub mod calculations;
pub mod config;
pub mod models;

pub use calculations::{SalaryCalculationError, SalaryCalculator};
pub use config::{ConfigError, RegimeConfig, TaxConfig};
pub use models::*;
