//! Candidate scoring for catalog search results.
//!
//! This module contains both selection paths:
//! - Non-remix: independent artist and track sub-scores, each gated
//! - Remix: one additive score against remixer/type/artist/track signals
//!
//! Point values and thresholds are tuned against the regression cases in the
//! tests below. Re-run them before touching any constant.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::diagnostics::Diagnostics;
use crate::models::{CandidateTrack, ScoredCandidate};
use crate::normalize::{compact_key, normalize_for_match, strip_variations};

// ============================================================================
// Score Thresholds
// ============================================================================

/// Artist contained in (or containing) a credited artist, or equal ignoring punctuation
pub const ARTIST_EXACT: i32 = 10;
/// First word of a multi-word artist found in a credited artist
pub const ARTIST_FIRST_WORD: i32 = 8;
/// Some artist word longer than 3 chars found in a credited artist
pub const ARTIST_SIGNIFICANT_WORD: i32 = 6;
/// Minimum artist sub-score to accept a candidate
pub const MIN_ARTIST_SCORE: i32 = 6;

/// Target track is a substring of the candidate name
pub const TRACK_SUBSTRING: i32 = 8;
/// Substring match once variation suffixes are stripped
pub const TRACK_VARIATION: i32 = 7;
/// Single-word track found as or within a candidate word
pub const TRACK_SINGLE_WORD: i32 = 6;
/// Share of significant words that must match to double the overlap score
pub const WORD_OVERLAP_RATIO: f64 = 0.7;
/// Minimum track sub-score to accept a candidate
pub const MIN_TRACK_SCORE: i32 = 2;

/// Deducted when a clean query title meets a versioned candidate
pub const PURE_TITLE_PENALTY: i32 = 15;

/// Words must be longer than this to count as significant
const SIGNIFICANT_WORD_LEN: usize = 3;

pub const REMIXER_IN_NAME: i32 = 5;
pub const REMIXER_IN_ARTISTS: i32 = 5;
pub const REMIX_TYPE_IN_NAME: i32 = 3;
pub const REMIX_INDICATOR_IN_NAME: i32 = 2;
pub const REMIX_ARTIST_MATCH: i32 = 2;
pub const REMIX_TRACK_MATCH: i32 = 1;
/// Minimum composite remix score. No relaxed tier exists below it.
pub const MIN_REMIX_SCORE: i32 = 5;

pub const REMIX_INDICATORS: &[&str] = &["remix", "mix", "edit", "rework", "vip"];

// ============================================================================
// Regex Patterns
// ============================================================================

/// Version/remix vocabulary that makes a query title "not clean".
pub static VERSION_VOCABULARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:remix|mix|edit|version|rework|vip|bootleg|flip|remaster(?:ed)?|live|extended|radio|instrumental|acoustic|dub|deluxe|demo)\b").unwrap()
});

/// Version or label suffixes on a catalog track name.
pub static VERSION_SUFFIX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // "Gamma Player - Blue Potential Version", "- Club Mix", "- Dub Edit"
        Regex::new(r"(?i)\s-\s.*\b(?:version|mix|edit)\s*$").unwrap(),
        // "- Extended", "- Radio Edit", "- Instrumental", "- Live at ..."
        Regex::new(r"(?i)\s-\s(?:extended|radio|instrumental|live)\b").unwrap(),
        // "- Remastered", "- 2011 Remaster", "- Deluxe"
        Regex::new(r"(?i)\s-\s(?:\d{4}\s+)?(?:remaster(?:ed)?|deluxe)\b").unwrap(),
        // "(Blue Potential Version)", "(Dub Mix)", "(Radio Edit)"
        Regex::new(r"(?i)\([^\)]*\b(?:version|mix|edit)\)").unwrap(),
    ]
});

// ============================================================================
// Pattern Matching Helpers
// ============================================================================

/// A track string with no version vocabulary and no bracketed annotation.
pub fn is_clean_title(title: &str) -> bool {
    !title.contains(['(', ')', '[', ']']) && !VERSION_VOCABULARY.is_match(title)
}

pub fn has_version_suffix(name: &str) -> bool {
    VERSION_SUFFIX_PATTERNS.iter().any(|p| p.is_match(name))
}

/// Too short or too vague to match reliably.
pub fn is_too_vague(artist: &str, track: &str) -> bool {
    let artist_len = artist.trim().chars().count();
    let track_len = track.trim().chars().count();
    artist_len == 0 || track_len == 0 || track_len <= 2 || (artist_len <= 2 && track_len <= 3)
}

// ============================================================================
// Artist Scoring
// ============================================================================

/// Score the target artist against one credited artist name.
pub fn artist_name_score(artist: &str, candidate_artist: &str) -> i32 {
    let target = normalize_for_match(artist);
    let candidate = normalize_for_match(candidate_artist);
    if target.is_empty() || candidate.is_empty() {
        return 0;
    }

    if candidate.contains(&target)
        || target.contains(&candidate)
        || compact_key(&target) == compact_key(&candidate)
    {
        return ARTIST_EXACT;
    }

    let words: Vec<&str> = target.split_whitespace().collect();
    if words.len() > 1 && candidate.contains(words[0]) {
        return ARTIST_FIRST_WORD;
    }

    if words
        .iter()
        .any(|w| w.chars().count() > SIGNIFICANT_WORD_LEN && candidate.contains(w))
    {
        return ARTIST_SIGNIFICANT_WORD;
    }

    0
}

/// Best artist score over every credited artist. No artists scores 0.
pub fn artist_score(artist: &str, candidate: &CandidateTrack) -> i32 {
    candidate
        .artists
        .iter()
        .map(|a| artist_name_score(artist, &a.name))
        .max()
        .unwrap_or(0)
}

// ============================================================================
// Track Scoring
// ============================================================================

fn word_overlap_score(target: &str, candidate: &str) -> i32 {
    let candidate_words: Vec<&str> = candidate.split_whitespace().collect();
    let found = |w: &str| candidate_words.iter().any(|c| c.contains(w));
    let target_words: Vec<&str> = target.split_whitespace().collect();

    if target_words.len() == 1 {
        return if found(target_words[0]) { TRACK_SINGLE_WORD } else { 0 };
    }

    let significant: FxHashSet<&str> = target_words
        .iter()
        .copied()
        .filter(|w| w.chars().count() > SIGNIFICANT_WORD_LEN)
        .collect();
    if significant.is_empty() {
        return 0;
    }

    let matching = significant.iter().filter(|w| found(**w)).count();
    let ratio = matching as f64 / significant.len() as f64;
    if ratio >= WORD_OVERLAP_RATIO {
        matching as i32 * 2
    } else {
        matching as i32
    }
}

/// Track sub-score before the pure-title penalty. May be 0.
pub fn base_track_score(track: &str, candidate_name: &str) -> i32 {
    let target = normalize_for_match(track);
    let candidate = normalize_for_match(candidate_name);
    if target.is_empty() || candidate.is_empty() {
        return 0;
    }

    if candidate.contains(&target) {
        return TRACK_SUBSTRING;
    }

    let target_stripped = strip_variations(&target);
    let candidate_stripped = strip_variations(&candidate);
    if !target_stripped.is_empty()
        && !candidate_stripped.is_empty()
        && (candidate_stripped.contains(&target_stripped)
            || target_stripped.contains(&candidate_stripped))
    {
        return TRACK_VARIATION;
    }

    word_overlap_score(&target, &candidate)
}

/// Track sub-score including the pure-title penalty. May go negative.
pub fn track_score(track: &str, candidate_name: &str) -> i32 {
    let mut score = base_track_score(track, candidate_name);
    if is_clean_title(track) && has_version_suffix(candidate_name) {
        score -= PURE_TITLE_PENALTY;
    }
    score
}

// ============================================================================
// Non-remix Selection
// ============================================================================

/// Pick the best candidate for a plain (artist, track) target.
///
/// Both sub-scores must clear their gates; survivors rank by the sum, ties
/// going to the earlier search result. There is no lower-confidence tier.
pub fn find_best_track_match<'a>(
    diag: &Diagnostics,
    candidates: &'a [CandidateTrack],
    artist: &str,
    track: &str,
) -> Option<&'a CandidateTrack> {
    if is_too_vague(artist, track) {
        diag.trace("MATCH", format_args!("too vague to match: '{}' - '{}'", artist, track));
        return None;
    }

    let mut survivors: Vec<ScoredCandidate<'a>> = Vec::new();
    for candidate in candidates {
        let a_score = artist_score(artist, candidate);
        let t_score = track_score(track, &candidate.name);
        let accepted = a_score >= MIN_ARTIST_SCORE && t_score >= MIN_TRACK_SCORE;
        diag.trace(
            "MATCH",
            format_args!(
                "{} - {} => artist {}, track {}{}",
                candidate.primary_artist().unwrap_or("<none>"),
                candidate.name,
                a_score,
                t_score,
                if accepted { "" } else { " (rejected)" }
            ),
        );
        if accepted {
            survivors.push(ScoredCandidate {
                score: a_score + t_score,
                candidate,
            });
        }
    }

    // Stable sort keeps search order on ties
    survivors.sort_by(|a, b| b.score.cmp(&a.score));
    survivors.first().map(|s| s.candidate)
}

// ============================================================================
// Remix Selection
// ============================================================================

/// Additive remix score for one candidate.
pub fn remix_score(
    candidate: &CandidateTrack,
    artist: &str,
    track: &str,
    remixer: &str,
    remix_type: &str,
) -> i32 {
    let name = normalize_for_match(&candidate.name);
    let artist_names: Vec<String> = candidate
        .artists
        .iter()
        .map(|a| normalize_for_match(&a.name))
        .collect();
    let remixer = normalize_for_match(remixer);
    let remix_type = normalize_for_match(remix_type);
    let artist = normalize_for_match(artist);
    let track = normalize_for_match(track);

    let in_artists =
        |needle: &str| !needle.is_empty() && artist_names.iter().any(|a| a.contains(needle));
    let in_name = |needle: &str| !needle.is_empty() && name.contains(needle);

    let mut score = 0;
    if in_name(remixer.as_str()) {
        score += REMIXER_IN_NAME;
    }
    if in_artists(remixer.as_str()) {
        score += REMIXER_IN_ARTISTS;
    }
    if in_name(remix_type.as_str()) {
        score += REMIX_TYPE_IN_NAME;
    }
    if REMIX_INDICATORS.iter().any(|i| name.contains(i)) {
        score += REMIX_INDICATOR_IN_NAME;
    }
    if in_artists(artist.as_str()) {
        score += REMIX_ARTIST_MATCH;
    }
    if in_name(track.as_str()) {
        score += REMIX_TRACK_MATCH;
    }
    score
}

/// Pick the best candidate for a remix target. Never relaxes below
/// [`MIN_REMIX_SCORE`].
pub fn find_best_remix_match<'a>(
    diag: &Diagnostics,
    candidates: &'a [CandidateTrack],
    artist: &str,
    track: &str,
    remixer: &str,
    remix_type: &str,
) -> Option<&'a CandidateTrack> {
    let mut best: Option<ScoredCandidate<'a>> = None;
    for candidate in candidates {
        let score = remix_score(candidate, artist, track, remixer, remix_type);
        diag.trace(
            "REMIX",
            format_args!(
                "{} - {} => {}",
                candidate.primary_artist().unwrap_or("<none>"),
                candidate.name,
                score
            ),
        );
        if score < MIN_REMIX_SCORE {
            continue;
        }
        // Strictly greater keeps the earlier result on ties
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredCandidate { score, candidate });
        }
    }
    best.map(|b| b.candidate)
}

// ============================================================================
// Tests
// ============================================================================
