//! Label-pollution repair for upstream metadata.
//!
//! Page-title scrapes sometimes report the record label as the artist
//! ("Strength Music Recordings - Prayer"). When the extracted pair looks like
//! that, the post title is re-split instead.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ExtractedInfo, RawPost};
use crate::normalize::strip_trailing_brackets;
use crate::split::split_dash_colon;

/// Shapes of an "artist - track" string that carries a label.
pub static LABEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Artist - Track [Label]
        Regex::new(r"(?i)^.+\s-\s.+\s\[[^\]]+\]\s*$").unwrap(),
        // Artist - Track (Label Records)
        Regex::new(r"(?i)^.+\s-\s.+\s\([^\)]*\brecords\)\s*$").unwrap(),
        // Label Records - Track
        Regex::new(r"(?i)^.*\brecords\s-\s").unwrap(),
        // Label Recordings - Track
        Regex::new(r"(?i)^.*\brecordings\s-\s").unwrap(),
    ]
});

pub fn looks_label_polluted(artist: &str, track: &str) -> bool {
    let combined = format!("{} - {}", artist.trim(), track.trim());
    LABEL_PATTERNS.iter().any(|p| p.is_match(&combined))
}

/// Re-derive (artist, track) from the post title when the extraction looks
/// label-polluted. None when no pattern applies or nothing would change.
pub fn clean_metadata_for_search(info: &ExtractedInfo, post: &RawPost) -> Option<ExtractedInfo> {
    if !looks_label_polluted(&info.artist, &info.track) {
        return None;
    }

    let (artist, track) = split_dash_colon(&post.title)?;
    let track = strip_trailing_brackets(&track);
    if artist.is_empty() || track.is_empty() {
        return None;
    }
    if artist == info.artist.trim() && track == info.track.trim() {
        return None;
    }

    Some(ExtractedInfo {
        artist,
        track,
        ..info.clone()
    })
}
