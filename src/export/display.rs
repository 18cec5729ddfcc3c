//! On-screen number formatting (Swedish kronor)
//!
//! Kept apart from the table writer: these strings are for people, the CSV
//! output is for machines.

const GROUP_SEPARATOR: char = '\u{a0}';
const MINUS_SIGN: char = '\u{2212}';

/// Format as sv-SE currency, e.g. `1 234 567,89 kr` (with no-break spaces)
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let negative = value < 0.0 && fixed != "0.00";
    let mut text = String::with_capacity(fixed.len() + 8);
    if negative {
        text.push(MINUS_SIGN);
    }
    text.push_str(&group_thousands(whole));
    text.push(',');
    text.push_str(fraction);
    text.push(GROUP_SEPARATOR);
    text.push_str("kr");
    text
}

/// Format a percentage with two decimals, e.g. `12.34%`
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value)
    } else {
        "0.00%".to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_234_567.891), "1\u{a0}234\u{a0}567,89\u{a0}kr");
        assert_eq!(format_currency(300_000.0), "300\u{a0}000,00\u{a0}kr");
        assert_eq!(format_currency(999.999), "1\u{a0}000,00\u{a0}kr");
        assert_eq!(format_currency(0.0), "0,00\u{a0}kr");
        assert_eq!(format_currency(-0.001), "0,00\u{a0}kr");
        assert_eq!(format_currency(-42.5), "\u{2212}42,50\u{a0}kr");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(603.99887), "604.00%");
        assert_eq!(format_percent(12.344), "12.34%");
        assert_eq!(format_percent(2.0), "2.00%");
        assert_eq!(format_percent(f64::NAN), "0.00%");
    }
}
