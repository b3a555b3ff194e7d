/// Formats `n` with `,` thousands separators and no decimal places.
#[must_use]
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers_have_no_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(7), "7");
        assert_eq!(format_thousands(999), "999");
    }

    #[test]
    fn groups_by_three() {
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(12_345), "12,345");
        assert_eq!(format_thousands(123_456), "123,456");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn handles_u64_max() {
        assert_eq!(format_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }
}
