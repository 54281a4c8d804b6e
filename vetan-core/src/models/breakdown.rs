use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full result of a salary tax calculation.
///
/// Deduction credit fields (`section_80c`, `section_80d`, `hra_exemption`,
/// `nps_employer`) hold the amounts actually applied after clamping and
/// regime gating, so under the new regime the first three are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub gross_salary: Decimal,
    pub standard_deduction: Decimal,
    pub employee_pf: Decimal,
    pub employer_pf_non_taxable: Decimal,
    /// Employer PF above the ₹7,50,000 exemption limit, added back to
    /// taxable income.
    pub employer_pf_taxable: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub hra_exemption: Decimal,
    pub nps_employer: Decimal,
    pub other_deductions: Decimal,
    pub non_taxable_deductions: Decimal,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,
    pub net_monthly_salary: Decimal,
    /// Taxable income as a fraction of the top slab bound, for display.
    pub taxable_progress: Decimal,
}
