/// Formats whole US dollars as `$1,234` (no fraction digits).
pub fn format_usd(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(999), "$999");
        assert_eq!(format_usd(1000), "$1,000");
        assert_eq!(format_usd(10499), "$10,499");
        assert_eq!(format_usd(1_234_567), "$1,234,567");
    }

    #[test]
    fn negative_values_keep_sign_before_symbol() {
        assert_eq!(format_usd(-2500), "-$2,500");
    }
}
