//! Locale-independent numeric coercion helpers.
//!
//! These back the strict numeric getters on [crate::Value]. All of them
//! parse the *entire* input string or fail; none of them consult the
//! process locale. With the `mixed_numerics` feature (on by default) the
//! integer conversions go through `lexical`; otherwise the stdlib `FromStr`
//! implementations are used. Doubles always go through `fast-float`.

/// Shared prechecks: no empty strings, no surrounding JSON whitespace,
/// no embedded NUL bytes.
fn prechecks(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let bytes = text.as_bytes();
    let is_space = |b: u8| matches!(b, 0x20 | 0x09 | 0x0a | 0x0d);
    if is_space(bytes[0]) || is_space(bytes[bytes.len() - 1]) {
        return false;
    }
    !bytes.contains(&0)
}

macro_rules! integral_parser {
    ($name:ident, $int:ty) => {
        pub fn $name(text: &str) -> Option<$int> {
            if !prechecks(text) {
                return None;
            }
            #[cfg(feature = "mixed_numerics")]
            {
                lexical::parse::<$int, _>(text.as_bytes()).ok()
            }
            #[cfg(not(feature = "mixed_numerics"))]
            {
                text.parse::<$int>().ok()
            }
        }
    };
}

integral_parser!(parse_i32, i32);
integral_parser!(parse_i64, i64);
integral_parser!(parse_u32, u32);
integral_parser!(parse_u64, u64);

/// Parse a double, rejecting hexadecimal float notation up front (which
/// `fast-float` would otherwise accept).
pub fn parse_f64(text: &str) -> Option<f64> {
    if !prechecks(text) {
        return None;
    }
    let stripped = text.strip_prefix('-').unwrap_or(text);
    if stripped.starts_with("0x") || stripped.starts_with("0X") {
        return None;
    }
    fast_float::parse(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_plain_integers() {
        assert_eq!(parse_i32("-690"), Some(-690));
        assert_eq!(parse_i64("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_u64("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn should_reject_width_overflow() {
        assert_eq!(parse_i32("2147483648"), None);
        assert_eq!(parse_i64("2147483648"), Some(2147483648));
        assert_eq!(parse_i64("9223372036854775808"), None);
        assert_eq!(parse_u64("-1"), None);
    }

    #[test]
    fn should_reject_non_integral_text() {
        assert_eq!(parse_i32("1.5"), None);
        assert_eq!(parse_i32("1e3"), None);
        assert_eq!(parse_i32(""), None);
        assert_eq!(parse_i32(" 1"), None);
        assert_eq!(parse_i32("1 "), None);
    }

    #[test]
    fn should_parse_doubles() {
        assert_eq!(parse_f64("1.10000000"), Some(1.1));
        assert_eq!(parse_f64("-1.5e-5"), Some(-1.5e-5));
        assert_eq!(parse_f64("10"), Some(10.0));
    }

    #[test]
    fn should_reject_hex_floats() {
        assert_eq!(parse_f64("0x10"), None);
        assert_eq!(parse_f64("-0X1p4"), None);
    }
}
