mod breakdown;
mod inputs;
mod rebate_rule;
mod regime;
mod slab_rule;
mod surcharge_rule;

pub use breakdown::SalaryBreakdown;
pub use inputs::SalaryInputs;
pub use rebate_rule::RebateRule;
pub use regime::{PfOption, TaxRegime};
pub use slab_rule::SlabRule;
pub use surcharge_rule::SurchargeRule;
