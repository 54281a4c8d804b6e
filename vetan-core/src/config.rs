//! Immutable tax configuration: per-regime slab tables, rebate rules, the
//! shared surcharge table and the cess rate.
//!
//! A [`TaxConfig`] is validated once at construction and never mutated
//! afterwards; a malformed table is a startup failure ([`ConfigError`]),
//! never a per-calculation error. The engine borrows the config it is
//! given instead of reading process-wide state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{RebateRule, SlabRule, SurchargeRule, TaxRegime};

/// Errors detected while validating a tax configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{regime} regime has no slabs")]
    NoSlabs { regime: TaxRegime },

    #[error("{regime} regime slabs must start at 0, got {min}")]
    SlabsNotStartingAtZero { regime: TaxRegime, min: Decimal },

    #[error("{regime} regime slabs are not contiguous: expected min {expected}, got {found}")]
    SlabGap {
        regime: TaxRegime,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{regime} regime has a bounded slab after an unbounded one")]
    UnboundedSlabNotLast { regime: TaxRegime },

    #[error("{regime} regime top slab must be unbounded, got max {max}")]
    TopSlabBounded { regime: TaxRegime, max: Decimal },

    #[error("{regime} regime slab [{min}, ..) is empty or inverted (max {max})")]
    EmptySlab {
        regime: TaxRegime,
        min: Decimal,
        max: Decimal,
    },

    #[error("{regime} regime slab rate must be between 0 and 1, got {rate}")]
    InvalidSlabRate { regime: TaxRegime, rate: Decimal },

    #[error("{regime} regime standard deduction cannot be negative, got {amount}")]
    NegativeStandardDeduction { regime: TaxRegime, amount: Decimal },

    #[error("{regime} regime rebate threshold cannot be negative, got {threshold}")]
    NegativeRebateThreshold {
        regime: TaxRegime,
        threshold: Decimal,
    },

    #[error("{regime} regime rebate amount cannot be negative, got {amount}")]
    NegativeRebateAmount { regime: TaxRegime, amount: Decimal },

    #[error("surcharge bracket ({min}, {max}] is empty or inverted")]
    EmptySurchargeBracket { min: Decimal, max: Decimal },

    #[error("surcharge brackets overlap or are unsorted at min {min}")]
    SurchargeBracketsOverlap { min: Decimal },

    #[error("surcharge rate must be between 0 and 1, got {rate}")]
    InvalidSurchargeRate { rate: Decimal },

    #[error("cess rate must be between 0 and 1, got {rate}")]
    InvalidCessRate { rate: Decimal },
}

/// Per-regime configuration: standard deduction, rebate rule and the
/// ordered slab table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub standard_deduction: Decimal,
    pub rebate: RebateRule,
    pub slabs: Vec<SlabRule>,
}

/// The complete, validated tax configuration for one financial year.
///
/// Deserialization funnels through [`TaxConfig::new`], so a config that
/// never passed validation cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTaxConfig")]
pub struct TaxConfig {
    old: RegimeConfig,
    new: RegimeConfig,
    surcharge: Vec<SurchargeRule>,
    cess_rate: Decimal,
}

/// Raw deserialized form of [`TaxConfig`], before validation.
#[derive(Debug, Deserialize)]
struct UncheckedTaxConfig {
    old: RegimeConfig,
    new: RegimeConfig,
    surcharge: Vec<SurchargeRule>,
    cess_rate: Decimal,
}

impl TryFrom<UncheckedTaxConfig> for TaxConfig {
    type Error = ConfigError;

    fn try_from(raw: UncheckedTaxConfig) -> Result<Self, ConfigError> {
        Self::new(raw.old, raw.new, raw.surcharge, raw.cess_rate)
    }
}

impl TaxConfig {
    /// Builds a configuration, rejecting malformed tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if, for either regime, the slabs are not
    /// sorted, contiguous from 0 and capped by an unbounded top slab, if
    /// any rate is outside `[0, 1]`, if the standard deduction or rebate
    /// fields are negative, or if the surcharge brackets are unsorted,
    /// overlapping or empty, or the cess rate is outside `[0, 1]`.
    pub fn new(
        old: RegimeConfig,
        new: RegimeConfig,
        surcharge: Vec<SurchargeRule>,
        cess_rate: Decimal,
    ) -> Result<Self, ConfigError> {
        validate_regime(TaxRegime::Old, &old)?;
        validate_regime(TaxRegime::New, &new)?;
        validate_surcharge(&surcharge)?;
        if cess_rate < Decimal::ZERO || cess_rate > Decimal::ONE {
            return Err(ConfigError::InvalidCessRate { rate: cess_rate });
        }
        Ok(Self {
            old,
            new,
            surcharge,
            cess_rate,
        })
    }

    /// The built-in FY 2025-26 slab tables for both regimes.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the `Result` exists so a broken table is a
    /// startup error rather than a panic.
    pub fn fy2025_26() -> Result<Self, ConfigError> {
        let old = RegimeConfig {
            standard_deduction: rupees(50_000),
            rebate: RebateRule {
                threshold: rupees(500_000),
                amount: rupees(12_500),
            },
            slabs: vec![
                slab(0, Some(250_000), Decimal::ZERO),
                slab(250_000, Some(500_000), Decimal::new(5, 2)),
                slab(500_000, Some(1_000_000), Decimal::new(20, 2)),
                slab(1_000_000, None, Decimal::new(30, 2)),
            ],
        };
        let new = RegimeConfig {
            standard_deduction: rupees(75_000),
            rebate: RebateRule {
                threshold: rupees(700_000),
                amount: rupees(25_000),
            },
            slabs: vec![
                slab(0, Some(400_000), Decimal::ZERO),
                slab(400_000, Some(800_000), Decimal::new(5, 2)),
                slab(800_000, Some(1_200_000), Decimal::new(10, 2)),
                slab(1_200_000, Some(1_600_000), Decimal::new(15, 2)),
                slab(1_600_000, Some(2_000_000), Decimal::new(20, 2)),
                slab(2_000_000, Some(2_400_000), Decimal::new(25, 2)),
                slab(2_400_000, None, Decimal::new(30, 2)),
            ],
        };
        let surcharge = vec![
            bracket(5_000_000, 10_000_000, Decimal::new(10, 2)),
            bracket(10_000_000, 20_000_000, Decimal::new(15, 2)),
            bracket(20_000_000, 50_000_000, Decimal::new(25, 2)),
            bracket(50_000_000, 100_000_000, Decimal::new(37, 2)),
        ];
        Self::new(old, new, surcharge, Decimal::new(4, 2))
    }

    pub fn regime(&self, regime: TaxRegime) -> &RegimeConfig {
        match regime {
            TaxRegime::Old => &self.old,
            TaxRegime::New => &self.new,
        }
    }

    pub fn surcharge(&self) -> &[SurchargeRule] {
        &self.surcharge
    }

    pub fn cess_rate(&self) -> Decimal {
        self.cess_rate
    }
}

fn rupees(amount: i64) -> Decimal {
    Decimal::from(amount)
}

fn slab(min: i64, max: Option<i64>, rate: Decimal) -> SlabRule {
    SlabRule {
        min: rupees(min),
        max: max.map(rupees),
        rate,
    }
}

fn bracket(min: i64, max: i64, rate: Decimal) -> SurchargeRule {
    SurchargeRule {
        min: rupees(min),
        max: rupees(max),
        rate,
    }
}

fn validate_regime(regime: TaxRegime, config: &RegimeConfig) -> Result<(), ConfigError> {
    if config.standard_deduction < Decimal::ZERO {
        return Err(ConfigError::NegativeStandardDeduction {
            regime,
            amount: config.standard_deduction,
        });
    }
    if config.rebate.threshold < Decimal::ZERO {
        return Err(ConfigError::NegativeRebateThreshold {
            regime,
            threshold: config.rebate.threshold,
        });
    }
    if config.rebate.amount < Decimal::ZERO {
        return Err(ConfigError::NegativeRebateAmount {
            regime,
            amount: config.rebate.amount,
        });
    }

    let Some(first) = config.slabs.first() else {
        return Err(ConfigError::NoSlabs { regime });
    };
    if !first.min.is_zero() {
        return Err(ConfigError::SlabsNotStartingAtZero {
            regime,
            min: first.min,
        });
    }

    let mut expected_min = Decimal::ZERO;
    for (i, rule) in config.slabs.iter().enumerate() {
        if rule.rate < Decimal::ZERO || rule.rate > Decimal::ONE {
            return Err(ConfigError::InvalidSlabRate {
                regime,
                rate: rule.rate,
            });
        }
        if rule.min != expected_min {
            return Err(ConfigError::SlabGap {
                regime,
                expected: expected_min,
                found: rule.min,
            });
        }
        match rule.max {
            Some(max) => {
                if max <= rule.min {
                    return Err(ConfigError::EmptySlab {
                        regime,
                        min: rule.min,
                        max,
                    });
                }
                if i == config.slabs.len() - 1 {
                    return Err(ConfigError::TopSlabBounded { regime, max });
                }
                expected_min = max;
            }
            None => {
                if i != config.slabs.len() - 1 {
                    return Err(ConfigError::UnboundedSlabNotLast { regime });
                }
            }
        }
    }
    Ok(())
}

fn validate_surcharge(brackets: &[SurchargeRule]) -> Result<(), ConfigError> {
    let mut previous_max = Decimal::MIN;
    for rule in brackets {
        if rule.rate < Decimal::ZERO || rule.rate > Decimal::ONE {
            return Err(ConfigError::InvalidSurchargeRate { rate: rule.rate });
        }
        if rule.max <= rule.min {
            return Err(ConfigError::EmptySurchargeBracket {
                min: rule.min,
                max: rule.max,
            });
        }
        if rule.min < previous_max {
            return Err(ConfigError::SurchargeBracketsOverlap { min: rule.min });
        }
        previous_max = rule.max;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn minimal_regime() -> RegimeConfig {
        RegimeConfig {
            standard_deduction: dec!(50000),
            rebate: RebateRule {
                threshold: dec!(500000),
                amount: dec!(12500),
            },
            slabs: vec![
                SlabRule {
                    min: dec!(0),
                    max: Some(dec!(250000)),
                    rate: dec!(0),
                },
                SlabRule {
                    min: dec!(250000),
                    max: None,
                    rate: dec!(0.30),
                },
            ],
        }
    }

    fn build(old: RegimeConfig, new: RegimeConfig) -> Result<TaxConfig, ConfigError> {
        TaxConfig::new(old, new, vec![], dec!(0.04))
    }

    #[test]
    fn fy2025_26_is_valid() {
        let config = TaxConfig::fy2025_26().unwrap();

        assert_eq!(config.regime(TaxRegime::Old).standard_deduction, dec!(50000));
        assert_eq!(config.regime(TaxRegime::New).standard_deduction, dec!(75000));
        assert_eq!(config.regime(TaxRegime::Old).slabs.len(), 4);
        assert_eq!(config.regime(TaxRegime::New).slabs.len(), 7);
        assert_eq!(config.surcharge().len(), 4);
        assert_eq!(config.cess_rate(), dec!(0.04));
    }

    #[test]
    fn fy2025_26_top_slabs_are_unbounded() {
        let config = TaxConfig::fy2025_26().unwrap();

        assert_eq!(config.regime(TaxRegime::Old).slabs.last().unwrap().max, None);
        assert_eq!(config.regime(TaxRegime::New).slabs.last().unwrap().max, None);
    }

    #[test]
    fn rejects_empty_slab_table() {
        let mut old = minimal_regime();
        old.slabs.clear();

        let result = build(old, minimal_regime());

        assert_eq!(
            result.unwrap_err(),
            ConfigError::NoSlabs {
                regime: TaxRegime::Old
            }
        );
    }

    #[test]
    fn rejects_slabs_not_starting_at_zero() {
        let mut old = minimal_regime();
        old.slabs[0].min = dec!(100);

        let result = build(old, minimal_regime());

        assert_eq!(
            result.unwrap_err(),
            ConfigError::SlabsNotStartingAtZero {
                regime: TaxRegime::Old,
                min: dec!(100),
            }
        );
    }

    #[test]
    fn rejects_slab_gap() {
        let mut new = minimal_regime();
        new.slabs[1].min = dec!(300000);

        let result = build(minimal_regime(), new);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::SlabGap {
                regime: TaxRegime::New,
                expected: dec!(250000),
                found: dec!(300000),
            }
        );
    }

    #[test]
    fn rejects_overlapping_slabs() {
        let mut new = minimal_regime();
        new.slabs[1].min = dec!(200000);

        let result = build(minimal_regime(), new);

        assert!(matches!(result, Err(ConfigError::SlabGap { .. })));
    }

    #[test]
    fn rejects_bounded_top_slab() {
        let mut old = minimal_regime();
        old.slabs[1].max = Some(dec!(10000000));

        let result = build(old, minimal_regime());

        assert_eq!(
            result.unwrap_err(),
            ConfigError::TopSlabBounded {
                regime: TaxRegime::Old,
                max: dec!(10000000),
            }
        );
    }

    #[test]
    fn rejects_unbounded_slab_in_the_middle() {
        let mut old = minimal_regime();
        old.slabs[0].max = None;

        let result = build(old, minimal_regime());

        assert_eq!(
            result.unwrap_err(),
            ConfigError::UnboundedSlabNotLast {
                regime: TaxRegime::Old
            }
        );
    }

    #[test]
    fn rejects_slab_rate_above_one() {
        let mut old = minimal_regime();
        old.slabs[1].rate = dec!(1.5);

        let result = build(old, minimal_regime());

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidSlabRate {
                regime: TaxRegime::Old,
                rate: dec!(1.5),
            }
        );
    }

    #[test]
    fn rejects_negative_rebate_threshold() {
        let mut old = minimal_regime();
        old.rebate.threshold = dec!(-1);

        let result = build(old, minimal_regime());

        assert!(matches!(
            result,
            Err(ConfigError::NegativeRebateThreshold { .. })
        ));
    }

    #[test]
    fn rejects_overlapping_surcharge_brackets() {
        let surcharge = vec![
            SurchargeRule {
                min: dec!(5000000),
                max: dec!(10000000),
                rate: dec!(0.10),
            },
            SurchargeRule {
                min: dec!(8000000),
                max: dec!(20000000),
                rate: dec!(0.15),
            },
        ];

        let result = TaxConfig::new(minimal_regime(), minimal_regime(), surcharge, dec!(0.04));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::SurchargeBracketsOverlap { min: dec!(8000000) }
        );
    }

    #[test]
    fn rejects_inverted_surcharge_bracket() {
        let surcharge = vec![SurchargeRule {
            min: dec!(10000000),
            max: dec!(5000000),
            rate: dec!(0.10),
        }];

        let result = TaxConfig::new(minimal_regime(), minimal_regime(), surcharge, dec!(0.04));

        assert!(matches!(
            result,
            Err(ConfigError::EmptySurchargeBracket { .. })
        ));
    }

    #[test]
    fn rejects_cess_rate_above_one() {
        let result = TaxConfig::new(minimal_regime(), minimal_regime(), vec![], dec!(1.01));

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidCessRate { rate: dec!(1.01) }
        );
    }

    #[test]
    fn deserialization_round_trips_a_valid_config() {
        let config = TaxConfig::fy2025_26().unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let reloaded: TaxConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn deserialization_rejects_out_of_range_cess() {
        let config = TaxConfig::fy2025_26().unwrap();
        let mut value = serde_json::to_value(&config).unwrap();
        value["cess_rate"] = serde_json::Value::String("5.0".into());

        let result = serde_json::from_value::<TaxConfig>(value);

        assert!(result.is_err());
    }

    #[test]
    fn deserialization_rejects_malformed_slab_table() {
        let config = TaxConfig::fy2025_26().unwrap();
        let mut value = serde_json::to_value(&config).unwrap();
        // Inverting the first old-regime slab leaves a gap behind it.
        value["old"]["slabs"][0]["max"] = serde_json::Value::String("-100".into());
        value["old"]["slabs"][1]["rate"] = serde_json::Value::String("-0.05".into());

        let result = serde_json::from_value::<TaxConfig>(value);

        assert!(result.is_err());
    }

    #[test]
    fn non_contiguous_surcharge_brackets_are_allowed() {
        // The surcharge table is not required to cover all incomes; income
        // falling in a hole simply attracts no surcharge.
        let surcharge = vec![
            SurchargeRule {
                min: dec!(5000000),
                max: dec!(10000000),
                rate: dec!(0.10),
            },
            SurchargeRule {
                min: dec!(20000000),
                max: dec!(50000000),
                rate: dec!(0.25),
            },
        ];

        let result = TaxConfig::new(minimal_regime(), minimal_regime(), surcharge, dec!(0.04));

        assert!(result.is_ok());
    }
}
