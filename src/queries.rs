//! Catalog search query generation.
//!
//! Queries are ordered from most to least constrained. The caller stops at
//! the first query whose results produce an accepted match.

use rustc_hash::FxHashSet;

use crate::models::{ExtractedInfo, SearchQuery};

fn push_unique(queries: &mut SearchQuery, seen: &mut FxHashSet<String>, query: String) {
    let query = query.trim().to_string();
    if !query.is_empty() && seen.insert(query.clone()) {
        queries.push(query);
    }
}

/// Build the ordered query list for an (artist, track, remix) tuple.
pub fn build_search_queries(
    artist: &str,
    track: &str,
    is_remix: bool,
    remixer: Option<&str>,
    remix_type: Option<&str>,
) -> SearchQuery {
    let artist = artist.trim();
    let track = track.trim();
    let mut queries = SearchQuery::new();
    let mut seen = FxHashSet::default();

    if track.is_empty() {
        return queries;
    }

    // Remix-scoped queries
    let remixer = remixer.map(str::trim).filter(|r| !r.is_empty());
    let remix_type = remix_type.map(str::trim).filter(|t| !t.is_empty());
    if let (true, Some(remixer), Some(remix_type)) = (is_remix, remixer, remix_type) {
        let credit = format!("{} {}", remixer, remix_type);
        let remix_queries = if artist.is_empty() {
            [
                format!("\"{}\" \"{}\"", track, credit),
                format!("{} {}", track, credit),
                format!("\"{}\" \"{}\"", track, remixer),
                format!("{} {}", track, remixer),
            ]
        } else {
            [
                format!("\"{}\" \"{}\" \"{}\"", artist, track, credit),
                format!("\"{}\" \"{}\"", track, credit),
                format!("{} {} {}", artist, track, remixer),
                format!("\"{}\" \"{}\"", track, remixer),
            ]
        };
        for query in remix_queries {
            push_unique(&mut queries, &mut seen, query);
        }
    }

    // Standard artist + track combinations
    if !artist.is_empty() {
        let first_word = artist.split_whitespace().next().unwrap_or(artist);
        let multi_word = artist.split_whitespace().count() > 1;

        push_unique(&mut queries, &mut seen, format!("artist:\"{}\" track:\"{}\"", artist, track));
        push_unique(&mut queries, &mut seen, format!("artist:{} track:{}", artist, track));
        push_unique(&mut queries, &mut seen, format!("\"{}\" \"{}\"", artist, track));
        push_unique(&mut queries, &mut seen, format!("{} {}", artist, track));
        push_unique(&mut queries, &mut seen, format!("track:\"{}\" {}", track, artist));
        if multi_word {
            push_unique(&mut queries, &mut seen, format!("{} {}", first_word, track));
        }
    }

    // Track-only fallback, always last
    push_unique(&mut queries, &mut seen, format!("track:\"{}\"", track));
    push_unique(&mut queries, &mut seen, format!("\"{}\"", track));
    push_unique(&mut queries, &mut seen, track.to_string());

    queries
}

/// Convenience wrapper over [`build_search_queries`] for an extraction.
pub fn queries_for(info: &ExtractedInfo) -> SearchQuery {
    build_search_queries(
        &info.artist,
        &info.track,
        info.is_remix(),
        info.remixer(),
        info.remix_type(),
    )
}
