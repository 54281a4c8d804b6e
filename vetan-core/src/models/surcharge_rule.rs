use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One surcharge bracket. The bracket matching `min < taxable income <= max`
/// applies its rate to the computed tax as a flat surcharge; there is no
/// marginal blending and at most one bracket ever applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeRule {
    pub min: Decimal,
    pub max: Decimal,
    /// Surcharge rate as a fraction of the tax, e.g. 0.10 for 10%.
    pub rate: Decimal,
}
