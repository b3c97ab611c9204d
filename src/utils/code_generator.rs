//! Short code generation and format validation.
//!
//! Codes are 6 symbols drawn uniformly and independently from the 62-symbol
//! alphanumeric alphabet, giving a code space of 62^6 (about 5.7 * 10^10).

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Number of symbols in a short code.
pub const CODE_LENGTH: usize = 6;

/// Symbols a short code is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6}$").expect("valid code regex"));

/// Source of candidate short codes.
///
/// Production uses [`RandomCodeGenerator`]. The allocator only requires that
/// successive calls are independent draws; uniqueness is decided by the store.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random code generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code.
///
/// # Examples
///
/// ```
/// use shortlink::utils::code_generator::{generate_code, is_valid_code};
///
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_uses_alphabet() {
        for _ in 0..200 {
            let code = generate_code();
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_covers_all_symbol_classes() {
        let joined: String = (0..500).map(|_| generate_code()).collect();

        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
        assert!(joined.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<&u8> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_random_generator_delegates() {
        let code = RandomCodeGenerator.generate();
        assert!(is_valid_code(&code));
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("aB3xY9"));
        assert!(is_valid_code("000000"));

        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abc12"));
        assert!(!is_valid_code("abc1234"));
        assert!(!is_valid_code("abc-12"));
        assert!(!is_valid_code("abc_12"));
        assert!(!is_valid_code("abc 12"));
    }
}
