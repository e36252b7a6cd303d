use bigdecimal::{BigDecimal, RoundingMode};

const DISPLAY_DECIMALS: i64 = 2;

/// Two decimals, ties rounded away from zero, plain fixed-point notation.
pub fn format_amount(value: &BigDecimal) -> String {
    value
        .with_scale_round(DISPLAY_DECIMALS, RoundingMode::HalfUp)
        .to_plain_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn amount(s: &str) -> String {
        format_amount(&BigDecimal::from_str(s).unwrap())
    }

    #[test]
    fn test_format_amount_rounds_half_up() {
        assert_eq!("50000.01", amount("50000.005"));
        assert_eq!("3000.00", amount("3000.004"));
        assert_eq!("50000.00", amount("50000.004"));
        assert_eq!("123456.79", amount("123456.789"));
        assert_eq!("-1.24", amount("-1.235"));
    }

    #[test]
    fn test_format_amount_pads_to_two_decimals() {
        assert_eq!("42.00", amount("42"));
        assert_eq!("0.50", amount("0.5"));
        assert_eq!("0.00", amount("0.0001"));
    }

    #[test]
    fn test_format_amount_never_uses_exponent() {
        assert_eq!("1200000000000.00", amount("1.2e12"));
        assert_eq!("987654321987.65", amount("987654321987.6543"));
        assert_eq!("0.00", amount("1e-9"));
    }
}
