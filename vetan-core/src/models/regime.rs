use std::fmt;

use serde::{Deserialize, Serialize};

/// The statutory tax regime a salary is assessed under.
///
/// Regime and PF option arrive from the outside world as strings; both are
/// closed enums here so an unrecognized value is rejected at the boundary
/// instead of silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    Old,
    New,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the employee provident fund contribution is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PfOption {
    /// Flat ₹1,800 per month (₹21,600 per year).
    Fixed,
    /// 12% of gross salary, capped at ₹1,50,000 per year.
    TwelvePercent,
}

impl PfOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::TwelvePercent => "12percent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fixed" => Some(Self::Fixed),
            "12percent" => Some(Self::TwelvePercent),
            _ => None,
        }
    }
}

impl fmt::Display for PfOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
