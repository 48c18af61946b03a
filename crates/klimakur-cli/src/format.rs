//! Norwegian (bokmål) number formatting
//!
//! Groups of three digits separated by a no-break space, comma as decimal
//! separator, trailing fraction zeros dropped, U+2212 as minus sign.

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';
const MINUS: char = '\u{2212}';

/// Format with at most `max_fraction_digits` decimals
#[must_use]
pub fn format_nb(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 2);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push(MINUS);
    }

    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }

    if !frac_part.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
    }

    out
}

/// Mt CO2e with two decimals
#[must_use]
pub fn mt(value: f64) -> String {
    format!("{} Mt", format_nb(value, 2))
}

/// Billion NOK with two decimals
#[must_use]
pub fn billion_nok(value: f64) -> String {
    format!("{} mrd. kr", format_nb(value, 2))
}

/// NOK per tonne, whole kroner
#[must_use]
pub fn nok_per_tonne(value: f64) -> String {
    format!("{} kr/t", format_nb(value, 0))
}

/// Percentage with one decimal
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{} %", format_nb(value, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_and_decimal_comma() {
        assert_eq!(format_nb(1_234_567.891, 2), "1\u{a0}234\u{a0}567,89");
        assert_eq!(format_nb(999.0, 2), "999");
        assert_eq!(format_nb(1000.0, 0), "1\u{a0}000");
    }

    #[test]
    fn trailing_zeros_trimmed() {
        assert_eq!(format_nb(2.1075, 2), "2,11");
        assert_eq!(format_nb(2.5, 3), "2,5");
        assert_eq!(format_nb(3.0, 2), "3");
    }

    #[test]
    fn negative_and_zero() {
        assert_eq!(format_nb(-6.4, 1), "\u{2212}6,4");
        assert_eq!(format_nb(-0.001, 1), "0");
        assert_eq!(format_nb(0.0, 2), "0");
    }

    #[test]
    fn units() {
        assert_eq!(mt(21.7), "21,7 Mt");
        assert_eq!(nok_per_tonne(1500.0), "1\u{a0}500 kr/t");
        assert_eq!(percent(82.07), "82,1 %");
        assert_eq!(billion_nok(2.1075), "2,11 mrd. kr");
    }
}
