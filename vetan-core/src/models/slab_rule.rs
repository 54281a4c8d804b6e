use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive tax slab covering the half-open income interval
/// `[min, max)`. `max` is `None` for the unbounded top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabRule {
    pub min: Decimal,
    pub max: Option<Decimal>,
    /// Marginal rate as a fraction, e.g. 0.05 for 5%.
    pub rate: Decimal,
}
