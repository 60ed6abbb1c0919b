/// Strips every character that is not an ASCII digit.
///
/// `"EGP 26,499"` becomes `"26499"`. Decimal separators are dropped too, so
/// `"1,234.50"` becomes `"123450"`; listing prices on the site are whole
/// pounds.
pub fn normalize_price(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_currency_and_separators() {
        assert_eq!(normalize_price("EGP 26,499"), "26499");
        assert_eq!(normalize_price("  4 999 EGP "), "4999");
    }

    #[test]
    fn empty_or_digitless_input_yields_empty() {
        assert_eq!(normalize_price(""), "");
        assert_eq!(normalize_price("no digits"), "");
    }

    #[test]
    fn decimal_point_is_merged_into_token() {
        assert_eq!(normalize_price("1,234.50"), "123450");
    }

    #[test]
    fn non_ascii_digits_are_removed() {
        // Arabic-Indic digits are not 0-9.
        assert_eq!(normalize_price("٢٦ 12"), "12");
    }
}
