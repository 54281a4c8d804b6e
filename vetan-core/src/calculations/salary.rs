//! Salary income tax calculation for FY 2025-26 (old and new regimes).
//!
//! The calculation proceeds in a fixed order:
//!
//! 1. Validate inputs (positive gross salary, no negative amounts).
//! 2. Cap gross salary at ₹100 Cr and each deduction field at ₹1 Cr,
//!    then apply the statutory clamps: 80C ≤ ₹1.5L, 80D ≤ ₹50K,
//!    employer NPS ≤ 10% of basic (basic = half of gross).
//! 3. Reject inputs whose clamped deductions exceed gross salary.
//! 4. Employee PF: 12% of gross capped at ₹1.5L, or flat ₹21,600.
//!    Employer PF mirrors it; anything above ₹7.5L is taxable.
//! 5. Taxable income = gross − standard deduction − employee PF
//!    + taxable employer PF − non-taxable deductions − other deductions,
//!    floored at zero. The new regime never credits 80C/80D/HRA.
//! 6. Progressive slab tax, Section 87A rebate, flat surcharge on the
//!    tax by taxable-income bracket, then cess on tax + surcharge.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vetan_core::calculations::SalaryCalculator;
//! use vetan_core::{PfOption, SalaryInputs, TaxConfig, TaxRegime};
//!
//! let config = TaxConfig::fy2025_26().unwrap();
//! let calculator = SalaryCalculator::new(&config);
//! let breakdown = calculator
//!     .calculate(&SalaryInputs {
//!         regime: TaxRegime::Old,
//!         pf_option: PfOption::Fixed,
//!         gross_salary: dec!(1000000),
//!         section_80c: dec!(0),
//!         section_80d: dec!(0),
//!         hra_exemption: dec!(0),
//!         nps_employer: dec!(0),
//!         other_deductions: dec!(0),
//!     })
//!     .unwrap();
//!
//! assert_eq!(breakdown.taxable_income, dec!(928400));
//! assert_eq!(breakdown.total_tax, dec!(102107.20));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{max, round_half_up};
use crate::config::TaxConfig;
use crate::models::{
    PfOption, RebateRule, SalaryBreakdown, SalaryInputs, SlabRule, TaxRegime,
};

/// Errors that can occur during a salary tax calculation.
///
/// Configuration problems are caught at [`TaxConfig`] construction and can
/// never surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SalaryCalculationError {
    /// Gross salary was zero or negative.
    #[error("gross salary must be positive, got {0}")]
    NonPositiveGrossSalary(Decimal),

    /// A deduction field was negative.
    #[error("{field} cannot be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The clamped deductions add up to more than gross salary.
    #[error("total deductions {total} exceed gross salary {gross}")]
    DeductionsExceedGross { total: Decimal, gross: Decimal },
}

/// Inputs after the engine caps and statutory clamps have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClampedInputs {
    gross: Decimal,
    section_80c: Decimal,
    section_80d: Decimal,
    hra_exemption: Decimal,
    nps_employer: Decimal,
    other_deductions: Decimal,
}

/// Pure salary tax calculator over a borrowed, validated configuration.
///
/// Each call to [`calculate`](Self::calculate) is independent and
/// deterministic; the calculator holds no mutable state.
#[derive(Debug, Clone)]
pub struct SalaryCalculator<'a> {
    config: &'a TaxConfig,
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(config: &'a TaxConfig) -> Self {
        Self { config }
    }

    /// Computes the full tax breakdown for the given inputs.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryCalculationError`] if gross salary is not positive,
    /// any amount is negative, or the clamped deductions exceed gross
    /// salary. No tax arithmetic runs in any error case.
    pub fn calculate(
        &self,
        inputs: &SalaryInputs,
    ) -> Result<SalaryBreakdown, SalaryCalculationError> {
        self.validate(inputs)?;
        let clamped = self.clamp_inputs(inputs);
        self.check_deductions(&clamped)?;

        let regime = self.config.regime(inputs.regime);
        let standard_deduction = regime.standard_deduction;

        let employee_pf = self.employee_pf(clamped.gross, inputs.pf_option);
        let employer_pf = employee_pf;
        let taxable_employer_pf = self.taxable_employer_pf(employer_pf);

        let non_taxable_deductions = self.non_taxable_deductions(inputs.regime, &clamped);
        let taxable_income = self.taxable_income(
            clamped.gross,
            standard_deduction,
            employee_pf,
            taxable_employer_pf,
            non_taxable_deductions,
            clamped.other_deductions,
        );

        let slab_tax = self.slab_tax(taxable_income, &regime.slabs);
        let income_tax = self.apply_rebate(slab_tax, taxable_income, &regime.rebate);
        let surcharge = self.surcharge(income_tax, taxable_income);
        let cess = round_half_up((income_tax + surcharge) * self.config.cess_rate());

        let total_tax = income_tax + surcharge + cess;
        let total_deductions = total_tax
            + employee_pf
            + standard_deduction
            + non_taxable_deductions
            + clamped.other_deductions;
        let net_salary = clamped.gross
            - total_tax
            - employee_pf
            - non_taxable_deductions
            - clamped.other_deductions;
        let net_monthly_salary = round_half_up(net_salary / Decimal::from(12));

        let old_regime = inputs.regime == TaxRegime::Old;
        Ok(SalaryBreakdown {
            gross_salary: clamped.gross,
            standard_deduction,
            employee_pf,
            employer_pf_non_taxable: employer_pf - taxable_employer_pf,
            employer_pf_taxable: taxable_employer_pf,
            section_80c: if old_regime { clamped.section_80c } else { Decimal::ZERO },
            section_80d: if old_regime { clamped.section_80d } else { Decimal::ZERO },
            hra_exemption: if old_regime { clamped.hra_exemption } else { Decimal::ZERO },
            nps_employer: clamped.nps_employer,
            other_deductions: clamped.other_deductions,
            non_taxable_deductions,
            taxable_income,
            income_tax,
            surcharge,
            cess,
            total_tax,
            total_deductions,
            net_salary,
            net_monthly_salary,
            taxable_progress: self.progress_ratio(taxable_income, &regime.slabs),
        })
    }

    fn validate(&self, inputs: &SalaryInputs) -> Result<(), SalaryCalculationError> {
        if inputs.gross_salary <= Decimal::ZERO {
            return Err(SalaryCalculationError::NonPositiveGrossSalary(
                inputs.gross_salary,
            ));
        }
        for (field, value) in [
            ("section_80c", inputs.section_80c),
            ("section_80d", inputs.section_80d),
            ("hra_exemption", inputs.hra_exemption),
            ("nps_employer", inputs.nps_employer),
            ("other_deductions", inputs.other_deductions),
        ] {
            if value < Decimal::ZERO {
                return Err(SalaryCalculationError::NegativeAmount { field, value });
            }
        }
        Ok(())
    }

    /// Applies the engine caps (₹100 Cr gross, ₹1 Cr per deduction field)
    /// and the statutory clamps. Values already within bounds pass through
    /// unchanged. `other_deductions` only gets the generic cap; it is
    /// deliberately not limited against basic salary the way NPS is.
    fn clamp_inputs(&self, inputs: &SalaryInputs) -> ClampedInputs {
        let gross = inputs.gross_salary.min(gross_salary_cap());
        let basic = gross * Decimal::new(5, 1);
        let nps_limit = round_half_up(basic * Decimal::new(10, 2));

        let section_80c = inputs
            .section_80c
            .min(deduction_field_cap())
            .min(section_80c_limit());
        let section_80d = inputs
            .section_80d
            .min(deduction_field_cap())
            .min(section_80d_limit());
        let nps_employer = inputs.nps_employer.min(deduction_field_cap()).min(nps_limit);

        if section_80c < inputs.section_80c
            || section_80d < inputs.section_80d
            || nps_employer < inputs.nps_employer
        {
            warn!(
                section_80c = %inputs.section_80c,
                section_80d = %inputs.section_80d,
                nps_employer = %inputs.nps_employer,
                "deduction inputs clamped to statutory limits"
            );
        }

        ClampedInputs {
            gross,
            section_80c,
            section_80d,
            hra_exemption: inputs.hra_exemption.min(deduction_field_cap()),
            nps_employer,
            other_deductions: inputs.other_deductions.min(deduction_field_cap()),
        }
    }

    fn check_deductions(&self, clamped: &ClampedInputs) -> Result<(), SalaryCalculationError> {
        let total = clamped.section_80c
            + clamped.section_80d
            + clamped.hra_exemption
            + clamped.nps_employer
            + clamped.other_deductions;
        if total > clamped.gross {
            return Err(SalaryCalculationError::DeductionsExceedGross {
                total,
                gross: clamped.gross,
            });
        }
        Ok(())
    }

    fn employee_pf(&self, gross: Decimal, pf_option: PfOption) -> Decimal {
        match pf_option {
            PfOption::TwelvePercent => {
                round_half_up(gross * Decimal::new(12, 2)).min(pf_annual_cap())
            }
            PfOption::Fixed => fixed_annual_pf(),
        }
    }

    /// Employer PF above the ₹7,50,000 exemption limit is taxable.
    fn taxable_employer_pf(&self, employer_pf: Decimal) -> Decimal {
        max(employer_pf - employer_pf_exemption_limit(), Decimal::ZERO)
    }

    /// The new regime only allows the employer NPS contribution; 80C, 80D
    /// and HRA are excluded regardless of their input values.
    fn non_taxable_deductions(&self, regime: TaxRegime, clamped: &ClampedInputs) -> Decimal {
        match regime {
            TaxRegime::Old => {
                clamped.section_80c
                    + clamped.section_80d
                    + clamped.hra_exemption
                    + clamped.nps_employer
            }
            TaxRegime::New => clamped.nps_employer,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn taxable_income(
        &self,
        gross: Decimal,
        standard_deduction: Decimal,
        employee_pf: Decimal,
        taxable_employer_pf: Decimal,
        non_taxable_deductions: Decimal,
        other_deductions: Decimal,
    ) -> Decimal {
        let taxable = gross - standard_deduction - employee_pf + taxable_employer_pf
            - non_taxable_deductions
            - other_deductions;
        max(round_half_up(taxable), Decimal::ZERO)
    }

    /// Progressive marginal tax over the ordered slab table. Slabs are
    /// half-open `[min, max)`: income exactly at a slab's `max` is taxed
    /// entirely in that slab. The unbounded top slab taxes all remaining
    /// income.
    fn slab_tax(&self, taxable_income: Decimal, slabs: &[SlabRule]) -> Decimal {
        let mut tax = Decimal::ZERO;
        for slab in slabs {
            if taxable_income <= slab.min {
                break;
            }
            let upper = slab.max.map_or(taxable_income, |m| taxable_income.min(m));
            tax += (upper - slab.min) * slab.rate;
        }
        round_half_up(tax)
    }

    fn apply_rebate(
        &self,
        tax: Decimal,
        taxable_income: Decimal,
        rebate: &RebateRule,
    ) -> Decimal {
        if taxable_income <= rebate.threshold {
            max(tax - rebate.amount, Decimal::ZERO)
        } else {
            tax
        }
    }

    /// Flat surcharge on the tax, chosen by the taxable-income bracket.
    /// At most one bracket applies; income below the lowest `min` or
    /// beyond the highest `max` attracts none.
    fn surcharge(&self, tax: Decimal, taxable_income: Decimal) -> Decimal {
        for bracket in self.config.surcharge() {
            if taxable_income > bracket.min && taxable_income <= bracket.max {
                return round_half_up(tax * bracket.rate);
            }
        }
        Decimal::ZERO
    }

    /// Taxable income as a fraction of the top slab bound. With an
    /// unbounded top slab the bound is synthetic (taxable × 1.2) so the
    /// ratio stays displayable.
    fn progress_ratio(&self, taxable_income: Decimal, slabs: &[SlabRule]) -> Decimal {
        let top_bound = match slabs.last().and_then(|slab| slab.max) {
            Some(bound) => bound,
            None => taxable_income * Decimal::new(12, 1),
        };
        if top_bound <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (taxable_income / top_bound)
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
    }
}

fn gross_salary_cap() -> Decimal {
    Decimal::from(1_000_000_000_i64)
}

fn deduction_field_cap() -> Decimal {
    Decimal::from(10_000_000_i64)
}

fn section_80c_limit() -> Decimal {
    Decimal::from(150_000)
}

fn section_80d_limit() -> Decimal {
    Decimal::from(50_000)
}

fn pf_annual_cap() -> Decimal {
    Decimal::from(150_000)
}

// ₹1,800 per month.
fn fixed_annual_pf() -> Decimal {
    Decimal::from(21_600)
}

fn employer_pf_exemption_limit() -> Decimal {
    Decimal::from(750_000)
}
