//! Digit extraction for locale-dependent count and year strings.

use super::ExtractError;

/// Build an integer from every decimal digit in `text`, in order.
///
/// Everything else is ignored, so `"Citado por 375"` and `"Cited by 375"` both
/// give `375`, and an author line such as `"D Bernstein - IEEE Cloud Computing, 2014"`
/// gives `2014`. A string without any digit is an error rather than zero.
pub fn parse_int(text: &str) -> Result<u64, ExtractError> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(ExtractError::Format(format!("no digits in {:?}", text)));
    }

    digits
        .parse::<u64>()
        .map_err(|e| ExtractError::Format(format!("{:?} is not a valid integer: {}", digits, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_spanish() {
        assert_eq!(parse_int("Citado por 375").unwrap(), 375);
    }

    #[test]
    fn test_parse_int_english() {
        assert_eq!(parse_int("Cited by 1").unwrap(), 1);
    }

    #[test]
    fn test_parse_int_byline() {
        let byline = "D Bernstein - IEEE Cloud Computing, 2014 - ieeexplore.ieee.org";
        assert_eq!(parse_int(byline).unwrap(), 2014);
    }

    #[test]
    fn test_parse_int_concatenates_all_digits() {
        assert_eq!(parse_int("1a2b3").unwrap(), 123);
        assert_eq!(parse_int("007").unwrap(), 7);
    }

    #[test]
    fn test_parse_int_no_digits() {
        let err = parse_int("no digits").unwrap_err();
        assert!(matches!(err, ExtractError::Format(_)));
        assert!(parse_int("").is_err());
    }

    #[test]
    fn test_parse_int_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not decimal ASCII digits
        assert!(parse_int("٣٧٥").is_err());
    }

    #[test]
    fn test_parse_int_overflow() {
        let err = parse_int("99999999999999999999999").unwrap_err();
        assert!(matches!(err, ExtractError::Format(_)));
    }

    #[test]
    fn test_parse_int_arxiv_byline() {
        let byline = "A Vaswani, N Shazeer - arXiv preprint arXiv:1706.03762, 2017 - arxiv.org";
        assert_eq!(parse_int(byline).unwrap(), 1706037622017);
    }

    #[test]
    fn test_parse_int_grouped_thousands() {
        assert_eq!(parse_int("Cited by 12.345").unwrap(), 12345);
        assert_eq!(parse_int("Citado por 1,204").unwrap(), 1204);
    }
}
