/*!
 * Rule-based sentence boundary detection.
 *
 * Text is scanned word by word. A word ending in `.`, `!`, `?` or an
 * ellipsis (optionally followed by closing quotes or brackets) ends a
 * sentence unless it is a known abbreviation, a dotted acronym, an initial
 * followed by more of a name, or the next word clearly continues the
 * sentence. Month names and "No." only hold the sentence open before a number.
 */

use std::collections::HashSet;

use crate::language_utils;

// Abbreviations are stored lowercase and without the trailing dot
const COMMON_ABBREVIATIONS: &[&str] = &["etc", "vs", "ca", "cf", "e.g", "i.e", "approx", "vol", "fig"];

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "inc", "ltd", "co", "corp", "est", "gen",
    "gov", "sen", "rep", "rev", "capt", "lt", "col", "sgt", "al",
];

const PORTUGUESE_ABBREVIATIONS: &[&str] = &[
    "sr", "sra", "srta", "dr", "dra", "prof", "profa", "av", "sto", "sta", "pág", "pp", "ex", "nº", "séc",
    "sec", "cia", "ltda", "gen", "cel", "cap", "gov", "pe", "s.a", "a.c", "d.c",
];

// Words that read as abbreviations only when a number follows ("No. 5", "Jan. 12")
const COMMON_NUMBER_ABBREVIATIONS: &[&str] = &["no"];

const ENGLISH_NUMBER_ABBREVIATIONS: &[&str] =
    &["jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec"];

const PORTUGUESE_NUMBER_ABBREVIATIONS: &[&str] =
    &["jan", "fev", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez"];

// Capitalized words that open a sentence rather than continue a name
const SENTENCE_STARTERS: &[&str] = &[
    "A", "An", "The", "It", "Its", "He", "She", "They", "We", "I", "This", "That", "These", "Those", "There",
    "His", "Her", "Their", "In", "On", "At", "But", "And", "However", "After", "When", "O", "Os", "As", "Ele",
    "Ela", "Eles", "Elas", "Em", "No", "Na", "Nos", "Nas", "Isso", "Este", "Esta", "Seu", "Sua", "Mas",
    "Depois", "Um", "Uma",
];

const CLOSING_PUNCTUATION: &[char] = &['"', '\'', '”', '’', ')', ']', '»'];
const OPENING_PUNCTUATION: &[char] = &['"', '\'', '“', '‘', '(', '[', '«'];

/// Splits sanitized text into sentences
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    abbreviations: HashSet<String>,
    number_abbreviations: HashSet<String>,
}

impl SentenceSegmenter {
    /// Create a segmenter with the abbreviation table for `lang`
    ///
    /// Unknown or unsupported languages fall back to the English table.
    pub fn for_language(lang: &str) -> Self {
        let (table, number_table) = match language_utils::normalize_to_part1(lang).as_deref() {
            Ok("pt") => (PORTUGUESE_ABBREVIATIONS, PORTUGUESE_NUMBER_ABBREVIATIONS),
            _ => (ENGLISH_ABBREVIATIONS, ENGLISH_NUMBER_ABBREVIATIONS),
        };

        let abbreviations = COMMON_ABBREVIATIONS
            .iter()
            .chain(table.iter())
            .map(|a| a.to_string())
            .collect();
        let number_abbreviations = COMMON_NUMBER_ABBREVIATIONS
            .iter()
            .chain(number_table.iter())
            .map(|a| a.to_string())
            .collect();

        Self {
            abbreviations,
            number_abbreviations,
        }
    }

    /// Add abbreviations that never end a sentence, with or without the dot
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbreviation in extra {
            let normalized = abbreviation.as_ref().trim().trim_end_matches('.').to_lowercase();
            if !normalized.is_empty() {
                self.abbreviations.insert(normalized);
            }
        }
        self
    }

    /// Split text into sentences, in order of appearance
    pub fn split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut sentences = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for (i, word) in words.iter().enumerate() {
            current.push(word);
            if self.is_boundary(word, words.get(i + 1).copied()) {
                sentences.push(current.join(" "));
                current.clear();
            }
        }

        if !current.is_empty() {
            sentences.push(current.join(" "));
        }

        sentences
    }

    fn is_boundary(&self, word: &str, next: Option<&str>) -> bool {
        let core = word.trim_end_matches(CLOSING_PUNCTUATION);

        if core.ends_with("...") || core.ends_with('…') {
            return next.is_none_or(starts_uppercase);
        }

        if core.ends_with('!') || core.ends_with('?') {
            return next.is_none_or(|n| !starts_lowercase(n));
        }

        let Some(stem) = core.strip_suffix('.') else {
            return false;
        };

        let Some(next) = next else {
            return true;
        };

        let stem = stem.trim_start_matches(OPENING_PUNCTUATION);
        if self.is_abbreviation(stem) {
            return false;
        }

        if self.number_abbreviations.contains(&stem.to_lowercase()) && starts_with_digit(next) {
            return false;
        }

        // Initials such as "J." in "J. R. R. Tolkien", but not "vitamin C. It"
        if is_initial(stem) && starts_uppercase(next) && !is_sentence_starter(next) {
            return false;
        }

        !starts_lowercase(next)
    }

    fn is_abbreviation(&self, stem: &str) -> bool {
        if stem.is_empty() {
            return false;
        }

        self.abbreviations.contains(&stem.to_lowercase()) || is_dotted_acronym(stem)
    }
}

fn is_initial(stem: &str) -> bool {
    let mut chars = stem.chars();
    matches!((chars.next(), chars.next()), (Some(first), None) if first.is_uppercase())
}

fn is_sentence_starter(word: &str) -> bool {
    let word = word.trim_start_matches(OPENING_PUNCTUATION).trim_end_matches(',');
    SENTENCE_STARTERS.contains(&word)
}

/// "U.S", "p.m", "Ph.D": short letter groups joined by dots
fn is_dotted_acronym(stem: &str) -> bool {
    let parts: Vec<&str> = stem.split('.').collect();
    parts.len() >= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().count() <= 2 && p.chars().all(char::is_alphabetic))
}

fn first_letter(word: &str) -> Option<char> {
    word.trim_start_matches(OPENING_PUNCTUATION).chars().next()
}

fn starts_lowercase(word: &str) -> bool {
    first_letter(word).is_some_and(char::is_lowercase)
}

fn starts_uppercase(word: &str) -> bool {
    first_letter(word).is_some_and(char::is_uppercase)
}

fn starts_with_digit(word: &str) -> bool {
    first_letter(word).is_some_and(|c| c.is_ascii_digit())
}
