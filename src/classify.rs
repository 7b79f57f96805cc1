//! Non-music post detection.
//!
//! Runs before any other extraction so descriptive sentences about music
//! ("A trip-hop remix of ...") are never split into an artist/track pair.

use once_cell::sync::Lazy;
use regex::Regex;

/// Discussion and question posts.
pub static DISCUSSION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^(?:what|who|how|why|where|which|when|does|do|is|are|can|could|should|has|have|anyone|any)\b.*\?\s*$").unwrap(),
        Regex::new(r"(?i)\b(?:discussion|thoughts on|opinions? on|recommendations?|suggestions?|help me find|help identifying|looking for|id request|track id)\b").unwrap(),
    ]
});

/// Event announcements: tickets, lineups, streams.
pub static EVENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\b(?:tickets?|line-?up|tour dates|pre-?sale|giveaway|set times|livestream)\b").unwrap(),
        Regex::new(r"(?i)\b(?:festival|event|gig|concert|party|show)\s+(?:announcement|announced|this (?:weekend|week|friday|saturday)|tonight|next week)\b").unwrap(),
    ]
});

/// Generic "tracks that ..." requests and lists.
pub static GENERIC_PHRASING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^(?:any\s+|your\s+|favou?rite\s+|best\s+)?(?:tracks?|songs?|albums?|music|artists?)\s+(?:that|which|like|similar to|with|for|you)\b").unwrap(),
        Regex::new(r"(?i)^(?:top|best)\s+\d+\s+(?:tracks|songs|albums)\b").unwrap(),
    ]
});

/// Meta-subreddit vocabulary.
pub static META_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^\s*[\[\(]?meta\b").unwrap(),
        Regex::new(r"(?i)\b(?:subreddit|r/\w+|moderators?|mods|megathread|weekly thread|monthly thread|community update|rule change)\b").unwrap(),
    ]
});

/// "[META]" or "(meta)" tag opening the title.
pub static META_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*[\[\(]meta[\]\)]").unwrap());

/// "A/An <genre> remix of ..." descriptive sentence.
pub static DESCRIPTIVE_REMIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^an?\s+[\w\-]+(?:\s+[\w\-]+)?\s+remix\s+of\s+").unwrap());

/// Spaced dash between two sides: "Artist - Track", "Artist – Track".
pub static TRACK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S\s+[-–—]\s+\S").unwrap());

/// Titles shaped like "Artist - Track" are announcements; the discussion,
/// event, generic and meta vocabularies only apply to sentence-shaped titles.
fn is_track_shaped(title: &str) -> bool {
    TRACK_SEPARATOR.is_match(title)
}

/// True when the title is a discussion, event, meta or descriptive post
/// rather than a track announcement. Any category match rejects.
pub fn is_non_music_post(title: &str) -> bool {
    let lower = title.trim().to_lowercase();
    if DESCRIPTIVE_REMIX_PATTERN.is_match(&lower) || META_TAG_PATTERN.is_match(&lower) {
        return true;
    }
    if is_track_shaped(&lower) {
        return false;
    }
    DISCUSSION_PATTERNS
        .iter()
        .chain(EVENT_PATTERNS.iter())
        .chain(GENERIC_PHRASING_PATTERNS.iter())
        .chain(META_PATTERNS.iter())
        .any(|p| p.is_match(&lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptive_remix_sentences_rejected() {
        for title in [
            "A trip-hop remix of Caroline Polachek \"Pretty In Possible\"",
            "A house remix of Disclosure - Latch",
            "An electronic remix of Jamie xx - Gosh",
            "A drum-and-bass remix of Aphex Twin - Windowlicker",
            "A ambient remix of Brian Eno - Music for Airports",
        ] {
            assert!(is_non_music_post(title), "should reject: {}", title);
        }
    }

    #[test]
    fn test_track_titles_with_similar_words_kept() {
        for title in [
            "Artist - A Trip (House Remix)",
            "DJ - Electronic Dreams",
            "Ambient - Track Name",
            "The House Remix - Song Title",
            "Aphex Twin - A Remix",
            "Deadmau5 - Strobe (Eric Prydz Remix)",
            "Beatrice Dillon and Call Super - Inkjet",
            "Dexter - I Don't Care [Klakson, 2000]",
            "The Beatles - Ticket to Ride",
            "Moodymann - Mods",
            "Floating Points - Last Bloom (Discussion Mix)",
            "Eric Prydz - Opus (Looking For Dub)",
            "Kerri Chandler – Rain (Festival Tonight Edit)",
        ] {
            assert!(!is_non_music_post(title), "should keep: {}", title);
        }
    }

    #[test]
    fn test_discussion_posts_rejected() {
        assert!(is_non_music_post("What are you listening to this week?"));
        assert!(is_non_music_post("Thoughts on the new Burial EP"));
        assert!(is_non_music_post("Looking for dub techno with field recordings"));
    }

    #[test]
    fn test_event_and_meta_posts_rejected() {
        assert!(is_non_music_post("Dekmantel 2024 lineup is out"));
        assert!(is_non_music_post("Spare tickets for Berghain Saturday"));
        assert!(is_non_music_post("[META] New posting rules"));
        assert!(is_non_music_post("Weekly thread: share your mixes"));
        assert!(is_non_music_post("[META] Rules - read before posting"));
    }

    #[test]
    fn test_generic_phrasing_rejected() {
        assert!(is_non_music_post("Tracks that sound like rain"));
        assert!(is_non_music_post("Songs with weird time signatures"));
        assert!(is_non_music_post("Top 10 albums of the year"));
    }
}
