use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PfOption, TaxRegime};

/// Validated user inputs for one salary tax calculation.
///
/// All amounts are annual figures in rupees and must be non-negative.
/// Under the new regime the caller is expected to have resolved the
/// 80C/80D/HRA confirmation before submitting non-zero values; the engine
/// never credits them there either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInputs {
    pub regime: TaxRegime,
    pub pf_option: PfOption,
    pub gross_salary: Decimal,
    /// Section 80C investments (ELSS, PPF, ...), old regime only.
    pub section_80c: Decimal,
    /// Section 80D health insurance premium, old regime only.
    pub section_80d: Decimal,
    /// House rent allowance exemption, old regime only.
    pub hra_exemption: Decimal,
    /// Employer NPS contribution under Section 80CCD(2), valid in both regimes.
    pub nps_employer: Decimal,
    pub other_deductions: Decimal,
}
