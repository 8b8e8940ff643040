/*!
 * Tests for ISO language code utilities
 */

use wikireel::language_utils::{get_language_name, normalize_to_part1};

/// Test article language codes normalize to the Wikipedia edition code
#[test]
fn test_normalize_to_part1_withVariousCodes_shouldReturnTwoLetterCode() {
    assert_eq!(normalize_to_part1("en").unwrap(), "en");
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("por").unwrap(), "pt");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("Es").unwrap(), "es");
}

/// Test invalid codes are rejected
#[test]
fn test_normalize_to_part1_withInvalidCodes_shouldFail() {
    assert!(normalize_to_part1("").is_err());
    assert!(normalize_to_part1("q").is_err());
    assert!(normalize_to_part1("portuguese").is_err());
}

/// Test language names resolve from either code length
#[test]
fn test_get_language_name_withValidCodes_shouldReturnName() {
    assert_eq!(get_language_name("pt").unwrap(), "Portuguese");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("zz").is_err());
}
