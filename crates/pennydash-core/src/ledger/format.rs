const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';

/// Formats an amount the way the dashboard shows hryvnia values: two
/// decimals, a decimal comma and non-breaking-space digit groups.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format!("0{DECIMAL_SEPARATOR}00");
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_digits(whole);
    let is_negative = value < 0.0 && fixed != "0.00";
    let sign = if is_negative { "-" } else { "" };
    format!("{sign}{grouped}{DECIMAL_SEPARATOR}{fraction}")
}

fn group_digits(digits: &str) -> String {
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    let leading = digits.len() % 3;
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - leading) % 3 == 0 {
            output.push(GROUP_SEPARATOR);
        }
        output.push(character);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::format_amount;

    #[test]
    fn groups_thousands_with_nbsp_and_decimal_comma() {
        assert_eq!(format_amount(1250.3), "1\u{a0}250,30");
        assert_eq!(format_amount(15000.0), "15\u{a0}000,00");
        assert_eq!(format_amount(1234567.891), "1\u{a0}234\u{a0}567,89");
        assert_eq!(format_amount(999.999), "1\u{a0}000,00");
        assert_eq!(format_amount(0.5), "0,50");
    }

    #[test]
    fn negative_values_keep_sign_unless_rounded_to_zero() {
        assert_eq!(format_amount(-4000.3), "-4\u{a0}000,30");
        assert_eq!(format_amount(-0.001), "0,00");
    }

    #[test]
    fn non_finite_values_render_as_zero() {
        assert_eq!(format_amount(f64::NAN), "0,00");
        assert_eq!(format_amount(f64::INFINITY), "0,00");
    }
}
