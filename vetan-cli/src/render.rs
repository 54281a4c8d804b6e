//! Text rendering of a salary tax breakdown.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use vetan_core::{PfOption, SalaryBreakdown, SlabRule, TaxConfig, TaxRegime};

use crate::format::format_inr;

/// Income tax or total tax above this amount gets a "(high)" marker.
fn high_tax_threshold() -> Decimal {
    Decimal::from(500_000)
}

/// Builds the display rows for a breakdown, in presentation order.
///
/// Row gating mirrors the calculation rules: the employer-PF taxable
/// excess appears only when non-zero, the 80C/80D/HRA rows only under the
/// old regime, and surcharge only when one applied.
pub fn breakdown_rows(
    breakdown: &SalaryBreakdown,
    regime: TaxRegime,
    pf_option: PfOption,
) -> Vec<(String, String)> {
    let pf_label = match pf_option {
        PfOption::TwelvePercent => "Employee PF (12%, capped at ₹1.5L)",
        PfOption::Fixed => "Employee PF (₹1,800 PM)",
    };
    let high = |amount: Decimal| {
        if amount > high_tax_threshold() {
            format!("₹{} (high)", format_inr(amount))
        } else {
            format!("₹{}", format_inr(amount))
        }
    };
    let money = |amount: Decimal| format!("₹{}", format_inr(amount));

    let mut rows = vec![
        ("Gross Salary".to_string(), money(breakdown.gross_salary)),
        (
            "Standard Deduction".to_string(),
            money(breakdown.standard_deduction),
        ),
        (pf_label.to_string(), money(breakdown.employee_pf)),
        (
            "Employer PF (Non-Taxable)".to_string(),
            money(breakdown.employer_pf_non_taxable),
        ),
    ];
    if breakdown.employer_pf_taxable > Decimal::ZERO {
        rows.push((
            "Employer PF (Taxable Excess)".to_string(),
            money(breakdown.employer_pf_taxable),
        ));
    }
    if regime == TaxRegime::Old {
        rows.push((
            "Section 80C Deduction".to_string(),
            money(breakdown.section_80c),
        ));
        rows.push((
            "Section 80D Deduction".to_string(),
            money(breakdown.section_80d),
        ));
        rows.push((
            "HRA Exemption".to_string(),
            money(breakdown.hra_exemption),
        ));
    }
    rows.push((
        "Employer NPS Contribution".to_string(),
        money(breakdown.nps_employer),
    ));
    rows.push((
        "Other Deductions".to_string(),
        money(breakdown.other_deductions),
    ));
    rows.push((
        "Taxable Income".to_string(),
        money(breakdown.taxable_income),
    ));
    rows.push(("Income Tax".to_string(), high(breakdown.income_tax)));
    if breakdown.surcharge > Decimal::ZERO {
        rows.push(("Surcharge".to_string(), money(breakdown.surcharge)));
    }
    rows.push(("Cess".to_string(), money(breakdown.cess)));
    rows.push(("Total Tax".to_string(), high(breakdown.total_tax)));
    rows.push((
        "Total Deductions".to_string(),
        money(breakdown.total_deductions),
    ));
    rows.push((
        format!("Net Salary ({} regime, FY 2025-26)", regime),
        money(breakdown.net_salary),
    ));
    rows.push((
        "Net Monthly Salary".to_string(),
        money(breakdown.net_monthly_salary),
    ));
    rows
}

/// Renders the breakdown as an aligned two-column table.
pub fn render_table(
    breakdown: &SalaryBreakdown,
    regime: TaxRegime,
    pf_option: PfOption,
) -> String {
    let rows = breakdown_rows(breakdown, regime, pf_option);
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        let pad = " ".repeat(label_width - label.chars().count());
        out.push_str(&format!("{label}{pad}  {value}\n"));
    }
    out
}

/// Renders the slab reference table for both regimes, one row per slab
/// index with the old regime beside the new; the shorter table is padded
/// with "-" rows.
pub fn render_slab_reference(config: &TaxConfig) -> String {
    let old = slab_lines(&config.regime(TaxRegime::Old).slabs);
    let new = slab_lines(&config.regime(TaxRegime::New).slabs);
    let rows = old.len().max(new.len());
    let left_width = old
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max("Old Regime".len());
    let mut out = String::new();
    out.push_str(&format!(
        "{:<width$}  {}\n",
        "Old Regime",
        "New Regime",
        width = left_width
    ));
    for i in 0..rows {
        let left = old.get(i).map(String::as_str).unwrap_or("-");
        let right = new.get(i).map(String::as_str).unwrap_or("-");
        let pad = " ".repeat(left_width - left.chars().count());
        out.push_str(&format!("{left}{pad}  {right}\n"));
    }
    out
}

fn slab_lines(slabs: &[SlabRule]) -> Vec<String> {
    slabs
        .iter()
        .map(|slab| {
            let upper = match slab.max {
                Some(max) => format!("₹{}", format_inr(max)),
                None => "Above".to_string(),
            };
            let rate = (slab.rate * Decimal::ONE_HUNDRED).normalize();
            format!("₹{} - {}: {rate}%", format_inr(slab.min), upper)
        })
        .collect()
}

/// Renders the taxable-income progress ratio as an ASCII bar.
pub fn render_progress_bar(ratio: Decimal, width: usize) -> String {
    let clamped = ratio.clamp(Decimal::ZERO, Decimal::ONE);
    let filled = (clamped * Decimal::from(width as u64))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    let percent = (clamped * Decimal::ONE_HUNDRED).round_dp(1);
    format!(
        "Taxable Income Progress: [{}{}] {percent:.1}%",
        "#".repeat(filled),
        "-".repeat(width - filled)
    )
}
