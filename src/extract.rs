//! Post and comment extraction.
//!
//! Turns a post title (plus its link) or a discussion comment into an
//! [`ExtractedInfo`]: classifier first, remix parse on the raw text, then
//! cleaning and splitting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::is_non_music_post;
use crate::models::{Comment, ExtractedInfo, RawPost, Source};
use crate::normalize::clean_title_for_parsing;
use crate::remix::extract_remix_info;
use crate::split::{split_dashed, split_title};

// ============================================================================
// REGEX PATTERNS
// ============================================================================

pub static SPOTIFY_TRACK_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"spotify\.com/track/([a-zA-Z0-9]+)").unwrap());

/// Links to the platforms a comment can share a track from.
pub static MUSIC_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://[^\s/]*(?:youtube\.com|youtu\.be|spotify\.com|soundcloud\.com|bandcamp\.com)[^\s\)\]]*")
        .unwrap()
});

/// "[text]()" left behind once the URL of a markdown link is removed.
static EMPTY_MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(\s*\)").unwrap());

/// List bullets and quote markers at the start of a comment line.
static LINE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[\*\+•>]|\d{1,2}[\.\)]|-\s)\s*").unwrap());

/// Longer sides are sentences, not credits.
const MAX_COMMENT_ARTIST_WORDS: usize = 6;
const MAX_COMMENT_TRACK_WORDS: usize = 12;

// ============================================================================
// SOURCE DETECTION
// ============================================================================

/// Platform a post links to. Unrecognized links fall back to title parsing,
/// which reports itself as `Youtube`.
pub fn detect_source(url: &str) -> Source {
    let lower = url.to_lowercase();
    if lower.contains("youtube.com") || lower.contains("youtu.be") {
        Source::Youtube
    } else if lower.contains("spotify.com") {
        Source::Spotify
    } else if lower.contains("soundcloud.com") {
        Source::Soundcloud
    } else if lower.contains("bandcamp.com") {
        Source::Bandcamp
    } else {
        Source::Youtube
    }
}

pub fn spotify_track_id(url: &str) -> Option<String> {
    SPOTIFY_TRACK_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

// ============================================================================
// POST EXTRACTION
// ============================================================================

/// Parse a title into an extraction tagged with `source`. None if no track remains.
pub fn extract_from_title(title: &str, source: Source) -> Option<ExtractedInfo> {
    let remix = extract_remix_info(title);
    let cleaned = clean_title_for_parsing(title);
    let (artist, track) = split_title(&cleaned);
    if track.is_empty() {
        return None;
    }
    Some(ExtractedInfo {
        artist,
        track,
        source,
        remix: remix.credit,
        featured_artist: remix.featured_artist,
        spotify_id: None,
    })
}

/// Primary extraction for a post. None for non-music posts and empty titles.
pub fn extract_music_info(post: &RawPost) -> Option<ExtractedInfo> {
    if is_non_music_post(&post.title) {
        return None;
    }
    let source = detect_source(&post.url);
    let spotify_id = match source {
        Source::Spotify => spotify_track_id(&post.url),
        _ => None,
    };

    let mut info = match extract_from_title(&post.title, source) {
        Some(info) => info,
        // A direct track link is usable even when the title says nothing.
        None if spotify_id.is_some() => ExtractedInfo::new("", "", source),
        None => return None,
    };
    info.spotify_id = spotify_id;
    Some(info)
}

/// Replace artist/track with an upstream metadata pair, keeping remix fields
/// parsed from the post title.
pub fn with_upstream_pair(info: &ExtractedInfo, artist: &str, track: &str) -> ExtractedInfo {
    ExtractedInfo {
        artist: artist.trim().to_string(),
        track: track.trim().to_string(),
        ..info.clone()
    }
}

// ============================================================================
// COMMENT EXTRACTION
// ============================================================================

fn comment_line_pair(line: &str) -> Option<ExtractedInfo> {
    let line = LINE_PREFIX.replace(line, "");
    let line = line.trim();
    if line.is_empty() || is_non_music_post(line) {
        return None;
    }

    let remix = extract_remix_info(line);
    let cleaned = clean_title_for_parsing(line);
    let (artist, track) = split_dashed(&cleaned)?;
    if artist.is_empty()
        || track.is_empty()
        || artist.split_whitespace().count() > MAX_COMMENT_ARTIST_WORDS
        || track.split_whitespace().count() > MAX_COMMENT_TRACK_WORDS
    {
        return None;
    }

    Some(ExtractedInfo {
        artist,
        track,
        source: Source::CommentText,
        remix: remix.credit,
        featured_artist: remix.featured_artist,
        spotify_id: None,
    })
}

/// Extract a track mention from a discussion comment.
///
/// A supported link makes this a `CommentUrl` extraction (Spotify ids are
/// resolved directly); otherwise the first "Artist - Track" line wins.
pub fn extract_music_info_from_comment(comment: &Comment) -> Option<ExtractedInfo> {
    let body = comment.body.trim();
    if body.is_empty() {
        return None;
    }

    if let Some(url) = MUSIC_URL.find(body) {
        let spotify_id = spotify_track_id(url.as_str());
        let without_url = format!("{}{}", &body[..url.start()], &body[url.end()..]);
        let text = EMPTY_MARKDOWN_LINK.replace_all(&without_url, "$1");
        let pair = text.lines().find_map(comment_line_pair);

        return match (pair, spotify_id) {
            (Some(mut info), spotify_id) => {
                info.source = Source::CommentUrl;
                info.spotify_id = spotify_id;
                Some(info)
            }
            (None, Some(id)) => {
                let mut info = ExtractedInfo::new("", "", Source::CommentUrl);
                info.spotify_id = Some(id);
                Some(info)
            }
            (None, None) => None,
        };
    }

    body.lines().find_map(comment_line_pair)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, url: &str) -> RawPost {
        RawPost::new(title, url)
    }

    fn comment(body: &str) -> Comment {
        Comment {
            body: body.to_string(),
            score: 5,
        }
    }

    #[test]
    fn test_detect_source() {
        assert_eq!(detect_source("https://www.youtube.com/watch?v=x"), Source::Youtube);
        assert_eq!(detect_source("https://youtu.be/x"), Source::Youtube);
        assert_eq!(detect_source("https://open.spotify.com/track/abc"), Source::Spotify);
        assert_eq!(detect_source("https://soundcloud.com/a/b"), Source::Soundcloud);
        assert_eq!(detect_source("https://x.bandcamp.com/track/y"), Source::Bandcamp);
        assert_eq!(detect_source("https://example.com"), Source::Youtube);
    }

    #[test]
    fn test_extract_plain_post() {
        let info = extract_music_info(&post("Dexter - I Don't Care [Klakson, 2000]", "https://example.com")).unwrap();
        assert_eq!(info.artist, "Dexter");
        assert_eq!(info.track, "I Don't Care");
        assert!(!info.is_remix());
    }

    #[test]
    fn test_extract_remix_post() {
        let info = extract_music_info(&post(
            "Paranoid London - Eating Glue (SAD PROM Live Rework)",
            "https://www.youtube.com/watch?v=vVz8vkJopI4",
        ))
        .unwrap();
        assert_eq!(info.artist, "Paranoid London");
        assert_eq!(info.track, "Eating Glue");
        assert_eq!(info.remixer(), Some("SAD PROM Live"));
        assert_eq!(info.remix_type(), Some("rework"));
        assert_eq!(info.source, Source::Youtube);
    }

    #[test]
    fn test_extract_rejects_non_music() {
        let p = post(
            "A trip-hop remix of Caroline Polachek \"Pretty In Possible\"",
            "https://ksianboktet.bandcamp.com/track/pretty-in-possible-ksian-boktet-remix",
        );
        assert_eq!(extract_music_info(&p), None);
    }

    #[test]
    fn test_extract_spotify_link() {
        let info = extract_music_info(&post(
            "Octex - Bubblin",
            "https://open.spotify.com/track/4qxB0G1bAbI8Fml7d2xqzp?si=abc",
        ))
        .unwrap();
        assert_eq!(info.source, Source::Spotify);
        assert_eq!(info.spotify_id.as_deref(), Some("4qxB0G1bAbI8Fml7d2xqzp"));

        let bare = extract_music_info(&post("", "https://open.spotify.com/track/abc123")).unwrap();
        assert_eq!(bare.track, "");
        assert_eq!(bare.spotify_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_empty_title_rejected() {
        assert_eq!(extract_music_info(&post("   ", "https://youtu.be/x")), None);
    }

    #[test]
    fn test_with_upstream_pair_keeps_remix() {
        let info = extract_from_title("Flume - Never Be Like You (What So Not Remix)", Source::Youtube).unwrap();
        let replaced = with_upstream_pair(&info, " Flume ", "Never Be Like You");
        assert_eq!(replaced.artist, "Flume");
        assert_eq!(replaced.remixer(), Some("What So Not"));
    }

    #[test]
    fn test_comment_text_line() {
        let info = extract_music_info_from_comment(&comment(
            "Been looping this all week\n- Burial - Archangel\nso good",
        ))
        .unwrap();
        assert_eq!(info.source, Source::CommentText);
        assert_eq!(info.artist, "Burial");
        assert_eq!(info.track, "Archangel");
    }

    #[test]
    fn test_comment_with_markdown_link() {
        let info = extract_music_info_from_comment(&comment(
            "[Bicep - Glue](https://www.youtube.com/watch?v=abc)",
        ))
        .unwrap();
        assert_eq!(info.source, Source::CommentUrl);
        assert_eq!(info.artist, "Bicep");
        assert_eq!(info.track, "Glue");
        assert_eq!(info.spotify_id, None);
    }

    #[test]
    fn test_comment_with_bare_spotify_link() {
        let info = extract_music_info_from_comment(&comment(
            "this one https://open.spotify.com/track/5abc",
        ))
        .unwrap();
        assert_eq!(info.source, Source::CommentUrl);
        assert_eq!(info.spotify_id.as_deref(), Some("5abc"));
    }

    #[test]
    fn test_comment_chatter_yields_nothing() {
        assert_eq!(extract_music_info_from_comment(&comment("great post, thanks!")), None);
        assert_eq!(extract_music_info_from_comment(&comment("Edit: typo")), None);
        assert_eq!(
            extract_music_info_from_comment(&comment("https://www.youtube.com/watch?v=abc")),
            None
        );
        assert_eq!(
            extract_music_info_from_comment(&comment(
                "I honestly think that this whole thing - and I mean all of it - was overhyped by everyone here"
            )),
            None
        );
    }
}
