/// Format whole US dollars with thousands separators and no decimal places,
/// the way quote amounts are shown on the site.
pub fn format_usd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0), "$0");
        assert_eq!(format_usd(500), "$500");
        assert_eq!(format_usd(5000), "$5,000");
        assert_eq!(format_usd(123), "$123");
        assert_eq!(format_usd(1234567), "$1,234,567");
        assert_eq!(format_usd(-4300), "-$4,300");
    }
}
