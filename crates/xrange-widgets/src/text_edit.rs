#![forbid(unsafe_code)]

//! Parsing for the inline value label.
//!
//! The label is edited character by character, so the controller sees every
//! intermediate string. Two rules decide what an edit means:
//!
//! - [`is_mid_typing`]: a number that ends in a bare decimal point (`"12."`)
//!   is still being typed and must not be committed, or the point would be
//!   swallowed by re-rendering the label.
//! - [`parse_leading_float`]: otherwise the longest leading floating-point
//!   literal is taken and the rest of the text is ignored, so `"42px"` reads
//!   as `42` and `"abc"` reads as nothing.

/// Whether `text` ends in digits followed by a trailing decimal point.
#[must_use]
pub fn is_mid_typing(text: &str) -> bool {
    let Some(body) = text.strip_suffix('.') else {
        return false;
    };
    body.bytes().last().is_some_and(|b| b.is_ascii_digit())
}

/// Parse the leading floating-point literal of `text`.
///
/// Accepts leading whitespace, an optional sign, then either `Infinity` or
/// digits with an optional fraction and an optional exponent. An exponent
/// marker without digits ends the literal before it. Returns `None` when no
/// digits are found. Never returns NaN.
#[must_use]
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_typing_detection() {
        assert!(is_mid_typing("12."));
        assert!(is_mid_typing("-0."));
        assert!(is_mid_typing("1.2."));
        assert!(!is_mid_typing("12"));
        assert!(!is_mid_typing("12.5"));
        assert!(!is_mid_typing("."));
        assert!(!is_mid_typing("-."));
        assert!(!is_mid_typing(""));
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_leading_float("42"), Some(42.0));
        assert_eq!(parse_leading_float("-3.25"), Some(-3.25));
        assert_eq!(parse_leading_float("+7"), Some(7.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("-.5"), Some(-0.5));
        assert_eq!(parse_leading_float("5."), Some(5.0));
    }

    #[test]
    fn leading_whitespace_and_trailing_garbage() {
        assert_eq!(parse_leading_float("  \t12abc"), Some(12.0));
        assert_eq!(parse_leading_float("1.5.3"), Some(1.5));
        assert_eq!(parse_leading_float("0x10"), Some(0.0));
        assert_eq!(parse_leading_float("42px"), Some(42.0));
    }

    #[test]
    fn exponents() {
        assert_eq!(parse_leading_float("1e3"), Some(1000.0));
        assert_eq!(parse_leading_float("2.5E-1"), Some(0.25));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("1e+"), Some(1.0));
        assert_eq!(parse_leading_float("3ex"), Some(3.0));
    }

    #[test]
    fn infinity() {
        assert_eq!(parse_leading_float("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_float(" -Infinityx"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_float("+Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_float("inf"), None);
    }

    #[test]
    fn nothing_to_parse() {
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("   "), None);
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float("e5"), None);
        assert_eq!(parse_leading_float("NaN"), None);
    }
}
