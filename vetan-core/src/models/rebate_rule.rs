use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Section 87A rebate: if taxable income is at or below `threshold`,
/// `amount` is subtracted from the slab tax (floored at zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    pub threshold: Decimal,
    pub amount: Decimal,
}
