use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use vetan_cli::format::parse_amount;
use vetan_cli::render;
use vetan_cli::visits;
use vetan_core::{PfOption, SalaryCalculator, SalaryInputs, TaxConfig, TaxRegime};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RegimeArg {
    Old,
    New,
}

impl From<RegimeArg> for TaxRegime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::Old => TaxRegime::Old,
            RegimeArg::New => TaxRegime::New,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PfArg {
    /// Flat ₹1,800 per month.
    Fixed,
    /// 12% of gross salary, capped at ₹1.5L per year.
    #[value(name = "12percent")]
    TwelvePercent,
}

impl From<PfArg> for PfOption {
    fn from(arg: PfArg) -> Self {
        match arg {
            PfArg::Fixed => PfOption::Fixed,
            PfArg::TwelvePercent => PfOption::TwelvePercent,
        }
    }
}

/// Compute Indian salary income tax (FY 2025-26) under the old or new
/// regime.
///
/// Amounts accept Indian digit grouping, e.g. `--gross-salary 12,50,000`.
#[derive(Parser, Debug)]
#[command(name = "vetan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Annual gross salary in rupees
    #[arg(short, long)]
    gross_salary: Option<String>,

    /// Tax regime
    #[arg(short, long, value_enum, default_value_t = RegimeArg::New)]
    regime: RegimeArg,

    /// Employee provident fund option
    #[arg(short, long, value_enum, default_value_t = PfArg::Fixed)]
    pf_option: PfArg,

    /// Section 80C investments (old regime only)
    #[arg(long, default_value = "0")]
    section_80c: String,

    /// Section 80D health insurance premium (old regime only)
    #[arg(long, default_value = "0")]
    section_80d: String,

    /// HRA exemption (old regime only)
    #[arg(long, default_value = "0")]
    hra_exemption: String,

    /// Employer NPS contribution under Section 80CCD(2)
    #[arg(long, default_value = "0")]
    nps_employer: String,

    /// Other deductions
    #[arg(long, default_value = "0")]
    other_deductions: String,

    /// Keep non-zero 80C/80D/HRA values under the new regime instead of
    /// zeroing them (they still earn no deduction there)
    #[arg(long, default_value_t = false)]
    acknowledge_new_regime_deductions: bool,

    /// Print the slab reference table for both regimes
    #[arg(long, default_value_t = false)]
    show_slabs: bool,

    /// Visit log file; omit to disable visit tracking
    #[arg(long)]
    visit_log: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = TaxConfig::fy2025_26().context("built-in tax configuration is invalid")?;

    if args.show_slabs {
        print!("{}", render::render_slab_reference(&config));
    }
    let Some(raw_gross) = &args.gross_salary else {
        if args.show_slabs {
            return Ok(());
        }
        anyhow::bail!("--gross-salary is required unless --show-slabs is given");
    };

    let gross_salary = parse_amount(raw_gross).context("invalid --gross-salary")?;
    let mut section_80c = parse_amount(&args.section_80c).context("invalid --section-80c")?;
    let mut section_80d = parse_amount(&args.section_80d).context("invalid --section-80d")?;
    let mut hra_exemption =
        parse_amount(&args.hra_exemption).context("invalid --hra-exemption")?;
    let nps_employer = parse_amount(&args.nps_employer).context("invalid --nps-employer")?;
    let other_deductions =
        parse_amount(&args.other_deductions).context("invalid --other-deductions")?;

    let regime = TaxRegime::from(args.regime);
    let pf_option = PfOption::from(args.pf_option);

    // The engine expects the new-regime confirmation to be resolved before
    // it is called; without the flag the disallowed fields are zeroed here.
    if regime == TaxRegime::New
        && !args.acknowledge_new_regime_deductions
        && section_80c + section_80d + hra_exemption > Decimal::ZERO
    {
        warn!(
            "Section 80C/80D/HRA are not deductible under the new regime; ignoring them \
             (pass --acknowledge-new-regime-deductions to keep them in the totals)"
        );
        section_80c = Decimal::ZERO;
        section_80d = Decimal::ZERO;
        hra_exemption = Decimal::ZERO;
    }

    let inputs = SalaryInputs {
        regime,
        pf_option,
        gross_salary,
        section_80c,
        section_80d,
        hra_exemption,
        nps_employer,
        other_deductions,
    };
    let calculator = SalaryCalculator::new(&config);
    let breakdown = calculator.calculate(&inputs)?;

    print!("{}", render::render_table(&breakdown, regime, pf_option));
    println!("{}", render::render_progress_bar(breakdown.taxable_progress, 40));

    if let Some(path) = &args.visit_log {
        let stats = visits::track_visit(path, Utc::now());
        println!(
            "Visits: last 24h: {} | last week: {} | last month: {} | last year: {}",
            stats.last_day, stats.last_week, stats.last_month, stats.last_year
        );
    }

    Ok(())
}
