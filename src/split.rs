//! Artist/track splitting for cleaned titles.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator patterns in priority order. Group 1 is always taken as the
/// artist and group 2 as the track.
pub static SEPARATOR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Artist - Track (hyphen, en dash, em dash)
        Regex::new(r"(?i)^(.+?)\s*[-–—]\s*(.+)$").unwrap(),
        // Artist: Track
        Regex::new(r"(?i)^(.+?)\s*:\s*(.+)$").unwrap(),
        // Track by Artist. Groups are NOT swapped: left side lands in `artist`.
        Regex::new(r"(?i)^(.+?)\s+by\s+(.+)$").unwrap(),
        // [Artist] Track
        Regex::new(r"(?i)^\[(.+?)\]\s*(.+)$").unwrap(),
        // Artist | Track
        Regex::new(r"(?i)^(.+?)\s*\|\s*(.+)$").unwrap(),
        // Artist "Track"
        Regex::new(r#"(?i)^(.+?)\s*"(.+?)""#).unwrap(),
    ]
});

/// Number of leading patterns that make up the dash/colon splitter.
const DASH_COLON_PATTERNS: usize = 2;

fn split_with(patterns: &[Regex], title: &str) -> Option<(String, String)> {
    let title = title.trim();
    patterns.iter().find_map(|pattern| {
        let caps = pattern.captures(title)?;
        let artist = caps.get(1)?.as_str().trim().to_string();
        let track = caps.get(2)?.as_str().trim().to_string();
        Some((artist, track))
    })
}

/// Split on the first matching separator pattern, or None if no separator applies.
pub fn split_artist_track(title: &str) -> Option<(String, String)> {
    split_with(&SEPARATOR_PATTERNS, title)
}

/// Dash and colon separators only. Used when re-deriving a pair from a post
/// title that upstream metadata got wrong.
pub fn split_dash_colon(title: &str) -> Option<(String, String)> {
    split_with(&SEPARATOR_PATTERNS[..DASH_COLON_PATTERNS], title)
}

/// Dash separator only. Comment lines use this; a colon in chatter ("Edit: ...")
/// is not a track announcement.
pub fn split_dashed(line: &str) -> Option<(String, String)> {
    split_with(&SEPARATOR_PATTERNS[..1], line)
}

/// Split a cleaned title into (artist, track). With no separator the whole
/// title becomes the track and the artist is empty.
pub fn split_title(title: &str) -> (String, String) {
    split_artist_track(title).unwrap_or_else(|| (String::new(), title.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, t: &str) -> (String, String) {
        (a.to_string(), t.to_string())
    }

    #[test]
    fn test_dash_variants() {
        assert_eq!(split_title("Deadmau5 - Strobe"), pair("Deadmau5", "Strobe"));
        assert_eq!(split_title("If We Ever — High Contrast"), pair("If We Ever", "High Contrast"));
        assert_eq!(split_title("Burial – Archangel"), pair("Burial", "Archangel"));
        assert_eq!(
            split_title("Beatrice Dillon and Call Super - Inkjet"),
            pair("Beatrice Dillon and Call Super", "Inkjet")
        );
    }

    #[test]
    fn test_first_dash_wins() {
        assert_eq!(
            split_title("Artist - Song - Extended"),
            pair("Artist", "Song - Extended")
        );
    }

    #[test]
    fn test_colon_pipe_bracket_quote() {
        assert_eq!(split_title("Floating Points: Silhouettes"), pair("Floating Points", "Silhouettes"));
        assert_eq!(split_title("[Four Tet] Baby"), pair("Four Tet", "Baby"));
        assert_eq!(split_title("Bicep | Glue"), pair("Bicep", "Glue"));
        assert_eq!(
            split_title("Caroline Polachek \"Pretty In Possible\""),
            pair("Caroline Polachek", "Pretty In Possible")
        );
    }

    #[test]
    fn test_by_pattern_keeps_group_order() {
        // Left side is assigned to artist even though the phrasing reads "Track by Artist".
        assert_eq!(split_title("Windowlicker by Aphex Twin"), pair("Windowlicker", "Aphex Twin"));
    }

    #[test]
    fn test_fallback_whole_title_is_track() {
        assert_eq!(split_title("  Untitled Loop "), pair("", "Untitled Loop"));
        assert_eq!(split_artist_track("Untitled Loop"), None);
    }

    #[test]
    fn test_dash_colon_only() {
        assert_eq!(split_dash_colon("Bicep | Glue"), None);
        assert_eq!(split_dashed("Edit: thanks all"), None);
        assert_eq!(
            split_dash_colon("DJ Qu - Prayer [Strength Music, 2011]"),
            Some(pair("DJ Qu", "Prayer [Strength Music, 2011]"))
        );
    }
}
