//! Amount parsing and Indian (lakh/crore) digit grouping for display.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses an amount in rupees.
///
/// Accepts Indian digit grouping (e.g. `"12,50,000"`), trims whitespace,
/// and treats empty input as zero.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount with Indian digit grouping and two decimal places:
/// the last three integer digits form one group, the rest pair off in
/// twos (`1234567.8` → `"12,34,567.80"`).
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{rounded:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{frac_part}", group_indian(int_part))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_indian_grouping() {
        assert_eq!(parse_amount("12,50,000").unwrap(), dec!(1250000));
        assert_eq!(parse_amount("1,00,00,000").unwrap(), dec!(10000000));
    }

    #[test]
    fn parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("928400.50").unwrap(), dec!(928400.50));
        assert_eq!(parse_amount("  21600  ").unwrap(), dec!(21600));
    }

    #[test]
    fn parse_amount_empty_is_zero() {
        assert_eq!(parse_amount("").unwrap(), dec!(0));
        assert_eq!(parse_amount("   ").unwrap(), dec!(0));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(parse_amount("ten lakh").is_err());
        assert!(parse_amount("12..5").is_err());
    }

    #[test]
    fn format_inr_groups_in_twos_after_first_three() {
        assert_eq!(format_inr(dec!(0)), "0.00");
        assert_eq!(format_inr(dec!(999)), "999.00");
        assert_eq!(format_inr(dec!(1000)), "1,000.00");
        assert_eq!(format_inr(dec!(100000)), "1,00,000.00");
        assert_eq!(format_inr(dec!(1250000)), "12,50,000.00");
        assert_eq!(format_inr(dec!(10000000)), "1,00,00,000.00");
        assert_eq!(format_inr(dec!(1000000000)), "1,00,00,00,000.00");
    }

    #[test]
    fn format_inr_keeps_two_decimal_places() {
        assert_eq!(format_inr(dec!(102107.2)), "1,02,107.20");
        assert_eq!(format_inr(dec!(3927.204)), "3,927.20");
        assert_eq!(format_inr(dec!(3927.205)), "3,927.21");
    }

    #[test]
    fn format_inr_handles_negative_amounts() {
        assert_eq!(format_inr(dec!(-1250000)), "-12,50,000.00");
    }

    #[test]
    fn format_round_trips_through_parse() {
        for amount in [dec!(0), dec!(21600), dec!(928400), dec!(12345678.90)] {
            assert_eq!(parse_amount(&format_inr(amount)).unwrap(), amount);
        }
    }
}
