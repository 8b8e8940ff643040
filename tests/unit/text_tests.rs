/*!
 * Tests for article sanitizing and sentence splitting
 */

use wikireel::text::{SentenceSegmenter, sanitize};

use crate::common;

/// Test heading lines, blank lines and years in parentheses are removed
#[test]
fn test_sanitize_withMarkupAndParentheses_shouldReturnPlainText() {
    assert_eq!(sanitize("Line one\n=== Header ===\n\nLine two (1923) end"), "Line one Line two end");
}

/// Test nested groups disappear while unmatched parentheses stay
#[test]
fn test_sanitize_withNestedAndUnbalancedGroups_shouldKeepOnlyUnmatched() {
    assert_eq!(sanitize("Pelé (Edson (born 1940) Nascimento) played."), "Pelé played.");
    assert_eq!(sanitize("A smile :) here (and there"), "A smile :) here (and there");
}

/// Test sanitizing twice changes nothing
#[test]
fn test_sanitize_withSanitizedText_shouldBeIdempotent() {
    let once = sanitize(common::SAMPLE_ARTICLE);
    assert_eq!(sanitize(&once), once);
    assert!(!once.contains("  "));
    assert!(!once.contains('('));
    assert!(!once.contains("=="));
}

/// Test the sample article splits into its six sentences
#[test]
fn test_split_withSampleArticle_shouldFindSentencesInOrder() {
    let sentences = SentenceSegmenter::for_language("en").split(&sanitize(common::SAMPLE_ARTICLE));

    assert_eq!(
        sentences,
        vec![
            "Rio de Janeiro Rio de Janeiro is a city.",
            "It was founded in 1565.",
            "It is known for its beaches.",
            "Dr. Silva lived there.",
            "The Cristo Redentor statue overlooks the bay.",
            "The city hosted the Olympics.",
        ]
    );
}

/// Test Portuguese abbreviations do not end sentences
#[test]
fn test_split_withPortugueseAbbreviations_shouldKeepSentenceWhole() {
    let sentences = SentenceSegmenter::for_language("pt").split("O Sr. Silva mora na Av. Paulista. Ele gosta de lá.");
    assert_eq!(sentences, vec!["O Sr. Silva mora na Av. Paulista.", "Ele gosta de lá."]);
}

/// Test configured abbreviations extend the language table
#[test]
fn test_split_withExtraAbbreviations_shouldHonorThem() {
    let text = "Take Rte. Nine north. It is clear.";
    assert_eq!(SentenceSegmenter::for_language("en").split(text).len(), 3);

    let segmenter = SentenceSegmenter::for_language("en").with_abbreviations(["Rte."]);
    assert_eq!(segmenter.split(text), vec!["Take Rte. Nine north.", "It is clear."]);
}

/// Test empty text yields no sentences
#[test]
fn test_split_withEmptyText_shouldReturnNothing() {
    assert!(SentenceSegmenter::for_language("en").split("   ").is_empty());
}
