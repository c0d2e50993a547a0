//! Shortcode generation and format validation.

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated shortcodes when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Shortest and longest accepted shortcode.
pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 20;

static SHORTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]{3,20}$").expect("shortcode pattern is a valid regex")
});

/// Generates a random shortcode drawn uniformly from `[A-Za-z0-9]`.
///
/// Uniqueness is not checked here; see
/// [`crate::domain::allocator::ShortcodeAllocator::generate`].
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true iff `code` matches `^[A-Za-z0-9]{3,20}$`.
pub fn is_valid_shortcode(code: &str) -> bool {
    SHORTCODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(DEFAULT_CODE_LENGTH).len(), 6);
        assert_eq!(generate_code(12).len(), 12);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(is_valid_shortcode(&code));
        }
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code(8)).collect();
        assert!(codes.len() > 990);
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(is_valid_shortcode("abc"));
        assert!(is_valid_shortcode("abcdefghij0123456789"));
        assert!(!is_valid_shortcode("ab"));
        assert!(!is_valid_shortcode("abcdefghij01234567890"));
        assert!(!is_valid_shortcode(""));
    }

    #[test]
    fn test_validate_mixed_case_and_digits() {
        assert!(is_valid_shortcode("AbC123"));
        assert!(is_valid_shortcode("123456"));
    }

    #[test]
    fn test_validate_rejects_non_alphanumeric() {
        for code in ["my-code", "my_code", "my code", "code!", "cödé", "abc\n"] {
            assert!(!is_valid_shortcode(code), "{code:?} should be rejected");
        }
    }
}
