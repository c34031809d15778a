use crate::str_utils::group_thousands;

/// Formats an amount in Chilean pesos, rounded to whole pesos with `.` as the
/// thousands separator: `19990.0` becomes `$19.990`. Amounts that are not
/// finite display as `$0`.
pub fn format_clp(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    // f64::round rounds halves away from zero
    let pesos = amount.round();
    let digits = format!("{}", pesos.abs());
    let grouped = group_thousands(&digits);
    if pesos < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod test {
    use super::format_clp;

    #[test]
    fn test_format_clp() {
        let test_cases = vec![
            (0.0, "$0"),
            (990.0, "$990"),
            (5000.0, "$5.000"),
            (19990.0, "$19.990"),
            (1234567.0, "$1.234.567"),
            // no decimals
            (19990.4, "$19.990"),
            (19990.5, "$19.991"),
            (-2500.0, "-$2.500"),
            (f64::NAN, "$0"),
            (f64::INFINITY, "$0"),
        ];

        for (amount, expected) in test_cases {
            assert_eq!(format_clp(amount), expected, "{amount}");
        }
    }

    #[test]
    fn negative_amounts_that_round_to_zero_have_no_sign() {
        assert_eq!(format_clp(-0.2), "$0");
    }
}
