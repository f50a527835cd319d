/// Apply the Brazilian phone mask to whatever the user typed.
///
/// Landlines (10 digits) become `(XX) XXXX-XXXX`, mobiles (11 digits)
/// `(XX) XXXXX-XXXX`. Partial input comes back as bare digits, and anything
/// past the mask is appended untouched so the validator still sees it.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let (area, prefix) = if digits.len() <= 10 { (2, 4) } else { (2, 5) };
    let masked = area + prefix + 4;
    if digits.len() < masked {
        return digits;
    }

    let (ddd, rest) = digits.split_at(area);
    let (first, rest) = rest.split_at(prefix);
    let (last, overflow) = rest.split_at(4);
    format!("({ddd}) {first}-{last}{overflow}")
}

pub fn digit_count(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mobile_numbers() {
        assert_eq!(format_phone("11999998888"), "(11) 99999-8888");
    }

    #[test]
    fn formats_landlines() {
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn reformats_already_masked_input() {
        assert_eq!(format_phone("(11) 3333-44445"), "(11) 33334-4445");
    }

    #[test]
    fn partial_input_stays_bare() {
        assert_eq!(format_phone("11 9999"), "119999");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn overflow_digits_are_kept() {
        assert_eq!(format_phone("119999988887"), "(11) 99999-88887");
    }

    #[test]
    fn counts_only_digits() {
        assert_eq!(digit_count("(11) 3333-4444"), 10);
    }
}
