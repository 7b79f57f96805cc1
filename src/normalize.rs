//! Text normalization shared by the extraction pipeline and the scorers.
//!
//! Two concerns live here: canonicalizing quote variants so titles typed on
//! phones compare equal to catalog names, and stripping annotation spans
//! (remix credits, labels, years) from a raw title before it is split.
//!
//! CRITICAL: the scorers compare strings produced by these functions. Run the
//! scoring tests after any change.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Parenthesized or bracketed span containing a remix-type keyword.
/// "(Eric Prydz Remix)", "[Grum Edit]", "(Original Mix)"
pub static REMIX_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[\(\[][^\)\]]*\b(?:remix|mix|edit|rework|vip|bootleg|flip)\b[^\)\]]*[\)\]]")
        .unwrap()
});

/// Parenthesized or bracketed span with a year or label vocabulary.
/// "[Klakson, 2000]", "(2022)", "(Warp Records)", "[Label: Kompakt]"
pub static METADATA_ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[\(\[][^\)\]]*(?:\b\d{4}\b|records|label)[^\)\]]*[\)\]]").unwrap()
});

/// Common catalog variation suffixes that don't change which recording is meant.
pub static VARIATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Years: "(2022)", "[1997]"
        Regex::new(r"\s*[\(\[]\d{4}[\)\]]").unwrap(),
        // Remaster variants: "(Remastered)", "(Remaster 2011)"
        Regex::new(r"(?i)\s*\(remaster[^\)]*\)").unwrap(),
        Regex::new(r"(?i)\s*\(original mix\)").unwrap(),
        Regex::new(r"(?i)\s*\(radio edit\)").unwrap(),
    ]
});

/// Trailing bracket or paren residue, including an unclosed one: "Prayer [Strength Music, 2011]"
pub static TRAILING_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[\(\[][^\(\[]*$").unwrap());

/// Regex to collapse runs of whitespace into a single space
pub static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Convert curly quotes, primes and accent marks used as apostrophes to their
/// straight ASCII forms.
/// e.g., "I Don\u{2019}t Care" → "I Don't Care"
pub fn normalize_quotes(s: &str) -> String {
    s.replace(['\u{2018}', '\u{2019}', '\u{201B}', '\u{2032}'], "'")
        .replace(['\u{201C}', '\u{201D}', '\u{201E}', '\u{2033}'], "\"")
        .replace(['\u{00B4}', '\u{0060}'], "'")
}

/// Lowercased, quote-normalized, whitespace-collapsed form used for substring tests.
pub fn normalize_for_match(s: &str) -> String {
    let unified = normalize_quotes(s).to_lowercase();
    MULTI_SPACE.replace_all(unified.trim(), " ").to_string()
}

/// Punctuation- and space-insensitive key: "Anton Zap" and "AntonZap" both → "antonzap".
pub fn compact_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// TITLE CLEANING
// ============================================================================

/// Strip remix annotations, then year/label annotations, from a raw title.
///
/// The remix parser must see the uncleaned title; only the splitter consumes
/// this output.
pub fn clean_title_for_parsing(title: &str) -> String {
    let without_remix = REMIX_ANNOTATION.replace_all(title, "");
    let without_metadata = METADATA_ANNOTATION.replace_all(&without_remix, "");
    without_metadata.trim().to_string()
}

/// Remove catalog variation suffixes (year, remaster, original mix, radio edit).
pub fn strip_variations(s: &str) -> String {
    let mut result = s.to_string();
    for pattern in VARIATION_PATTERNS.iter() {
        result = pattern.replace_all(&result, "").to_string();
    }
    result.trim().to_string()
}

/// Drop a trailing bracketed/parenthesized span and anything after it.
pub fn strip_trailing_brackets(s: &str) -> String {
    TRAILING_BRACKET.replace(s, "").trim().to_string()
}

// ============================================================================
// TESTS
// ============================================================================
