use std::str::FromStr;

use rust_decimal::Decimal;

// Display on Decimal with a precision truncates rather than rounds,
// so round explicitly first.
pub fn dollar_precision_str(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn is_within_tolerance(a: &Decimal, b: &Decimal, tolerance: &Decimal) -> bool {
    (*a - *b).abs() < *tolerance
}

/// Parses plain decimal literals, as well as scientific notation (eg. 1.5e3),
/// which some spreadsheet exports produce.
pub fn parse_decimal_lenient(s: &str) -> Result<Decimal, rust_decimal::Error> {
    match Decimal::from_str(s) {
        Ok(d) => Ok(d),
        Err(e) => {
            if s.contains(['e', 'E']) {
                Decimal::from_scientific(s)
            } else {
                Err(e)
            }
        }
    }
}
