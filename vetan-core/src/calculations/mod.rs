//! Salary tax calculation logic.

pub mod common;
pub mod salary;

pub use salary::{SalaryCalculationError, SalaryCalculator};
