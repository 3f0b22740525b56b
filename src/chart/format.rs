//! Value formatting for labels and tooltips

/// Group the integer part with `sep` every three digits
fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

/// Format as Brazilian currency, e.g. `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = group_thousands(&(cents / 100).to_string(), '.');
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, integer, cents % 100)
}

/// Abbreviate large numbers to K/M, e.g. `1.2M`, `45.3K`, `980`
pub fn abbreviate(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Format a value for display according to its unit
pub fn format_value(value: f64, unit: &str) -> String {
    match unit {
        "R$" => format_brl(value),
        "%" => format!("{:.1}%", value),
        _ => abbreviate(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(814.0), "R$ 814,00");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(-12.5), "-R$ 12,50");
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate(1_115_932.0), "1.1M");
        assert_eq!(abbreviate(171_317.0), "171.3K");
        assert_eq!(abbreviate(980.0), "980");
        assert_eq!(abbreviate(12.3), "12.3");
    }

    #[test]
    fn test_format_value_by_unit() {
        assert_eq!(format_value(35.04, "%"), "35.0%");
        assert_eq!(format_value(1100.0, "R$"), "R$ 1.100,00");
        assert_eq!(format_value(65_000.0, "habitantes"), "65.0K");
    }
}
