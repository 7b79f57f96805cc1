//! Core data models for post extraction and catalog matching.
//!
//! This module contains the records passed between the extraction pipeline,
//! the query builder and the candidate scorers.

use serde::{Deserialize, Serialize};

// ============================================================================
// Content Source Models
// ============================================================================

/// A post as delivered by the content source. Read-only input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawPost {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub id: Option<String>,
    /// Creation time, unix seconds
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(default)]
    pub num_comments: Option<u32>,
    /// Only populated for posts fetched with their comment section
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl RawPost {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }
}

/// A comment from a discussion thread.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
    #[serde(default)]
    pub score: i64,
}

// ============================================================================
// Extraction Models
// ============================================================================

/// Where an extracted (artist, track) pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Youtube,
    Spotify,
    Soundcloud,
    Bandcamp,
    CommentUrl,
    CommentText,
}

/// A remixer credit. Both fields are non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemixCredit {
    pub remixer: String,
    /// Lowercased keyword: remix, mix, edit, rework, vip, bootleg or flip
    pub remix_type: String,
}

/// Output of the remix parser for one title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemixInfo {
    pub credit: Option<RemixCredit>,
    pub featured_artist: Option<String>,
}

impl RemixInfo {
    pub fn is_remix(&self) -> bool {
        self.credit.is_some()
    }
}

/// Normalized (artist, track, remix) tuple extracted from one post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub artist: String,
    pub track: String,
    pub source: Source,
    pub remix: Option<RemixCredit>,
    pub featured_artist: Option<String>,
    pub spotify_id: Option<String>,
}

impl ExtractedInfo {
    pub fn new(artist: impl Into<String>, track: impl Into<String>, source: Source) -> Self {
        Self {
            artist: artist.into(),
            track: track.into(),
            source,
            remix: None,
            featured_artist: None,
            spotify_id: None,
        }
    }

    pub fn is_remix(&self) -> bool {
        self.remix.is_some()
    }

    pub fn remixer(&self) -> Option<&str> {
        self.remix.as_ref().map(|r| r.remixer.as_str())
    }

    pub fn remix_type(&self) -> Option<&str> {
        self.remix.as_ref().map(|r| r.remix_type.as_str())
    }

    /// Same (artist, track) pair, ignoring case and surrounding whitespace.
    pub fn same_pair(&self, other: &ExtractedInfo) -> bool {
        self.artist.trim().eq_ignore_ascii_case(other.artist.trim())
            && self.track.trim().eq_ignore_ascii_case(other.track.trim())
    }
}

// ============================================================================
// Catalog Models
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateArtist {
    pub name: String,
}

/// Search result record from the catalog. The first artist is the primary credit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<CandidateArtist>,
}

impl CandidateTrack {
    pub fn new(id: &str, name: &str, artists: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| CandidateArtist {
                    name: a.to_string(),
                })
                .collect(),
        }
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }
}

/// Candidate paired with its score during ranking.
#[derive(Clone, Debug)]
pub struct ScoredCandidate<'a> {
    pub score: i32,
    pub candidate: &'a CandidateTrack,
}

/// Queries in priority order, most constrained first.
pub type SearchQuery = Vec<String>;

// ============================================================================
// Match Outcome
// ============================================================================

/// Which extraction strategy produced the accepted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Primary,
    TitleReparse,
    LabelCleaned,
}

impl Strategy {
    /// Fallback order used by the matcher.
    pub const CHAIN: [Strategy; 3] = [
        Strategy::Primary,
        Strategy::TitleReparse,
        Strategy::LabelCleaned,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub track_id: String,
    pub info: ExtractedInfo,
    pub strategy: Strategy,
    /// None when the id came straight from a Spotify link
    pub query: Option<String>,
}

/// What happened to one post in the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Classifier rejected the title
    NonMusic,
    /// No track could be extracted
    NoTrack,
    Unmatched(ExtractedInfo),
    Matched(MatchOutcome),
}

impl Resolution {
    pub fn outcome(&self) -> Option<&MatchOutcome> {
        match self {
            Resolution::Matched(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<MatchOutcome> {
        match self {
            Resolution::Matched(outcome) => Some(outcome),
            _ => None,
        }
    }
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Per-run matching statistics, one counter per outcome.
#[derive(Default, Debug, Clone, Serialize)]
pub struct MatchingStats {
    pub posts_seen: usize,
    pub posts_recent: usize,
    pub rejected_non_music: usize,
    pub extracted: usize,

    pub matched_direct_link: usize,
    pub matched_primary: usize,
    pub matched_title_reparse: usize,
    pub matched_label_cleaned: usize,
    pub unmatched: usize,

    // Discussion threads
    pub discussion_threads: usize,
    pub comments_considered: usize,
    pub comment_matches: usize,

    pub elapsed_seconds: f64,
}

impl MatchingStats {
    pub fn total_matches(&self) -> usize {
        self.matched_direct_link
            + self.matched_primary
            + self.matched_title_reparse
            + self.matched_label_cleaned
    }

    /// Calculate match rate as a percentage of extracted posts
    pub fn match_rate(&self) -> f64 {
        if self.extracted == 0 {
            0.0
        } else {
            100.0 * self.total_matches() as f64 / self.extracted as f64
        }
    }

    pub fn record_outcome(&mut self, outcome: Option<&MatchOutcome>) {
        match outcome {
            None => self.unmatched += 1,
            Some(o) if o.query.is_none() => self.matched_direct_link += 1,
            Some(o) => match o.strategy {
                Strategy::Primary => self.matched_primary += 1,
                Strategy::TitleReparse => self.matched_title_reparse += 1,
                Strategy::LabelCleaned => self.matched_label_cleaned += 1,
            },
        }
    }

    pub fn record_resolution(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::NonMusic => self.rejected_non_music += 1,
            Resolution::NoTrack => {}
            Resolution::Unmatched(_) | Resolution::Matched(_) => {
                self.extracted += 1;
                self.record_outcome(resolution.outcome());
            }
        }
    }

    /// Fold another run's counters into this one.
    pub fn merge(&mut self, other: &MatchingStats) {
        self.posts_seen += other.posts_seen;
        self.posts_recent += other.posts_recent;
        self.rejected_non_music += other.rejected_non_music;
        self.extracted += other.extracted;
        self.matched_direct_link += other.matched_direct_link;
        self.matched_primary += other.matched_primary;
        self.matched_title_reparse += other.matched_title_reparse;
        self.matched_label_cleaned += other.matched_label_cleaned;
        self.unmatched += other.unmatched;
        self.discussion_threads += other.discussion_threads;
        self.comments_considered += other.comments_considered;
        self.comment_matches += other.comment_matches;
    }

    /// Log stats in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            log::info!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_snake_case() {
        let json = serde_json::to_string(&Source::CommentUrl).unwrap();
        assert_eq!(json, "\"comment_url\"");
    }

    #[test]
    fn test_candidate_without_artists_deserializes() {
        let c: CandidateTrack = serde_json::from_str(r#"{"id":"x","name":"Song"}"#).unwrap();
        assert!(c.artists.is_empty());
        assert_eq!(c.primary_artist(), None);
    }

    #[test]
    fn test_record_outcome_buckets() {
        let info = ExtractedInfo::new("A", "T", Source::Spotify);
        let direct = MatchOutcome {
            track_id: "id".into(),
            info: info.clone(),
            strategy: Strategy::Primary,
            query: None,
        };
        let searched = MatchOutcome {
            query: Some("T".into()),
            strategy: Strategy::LabelCleaned,
            ..direct.clone()
        };
        let mut stats = MatchingStats {
            extracted: 4,
            ..Default::default()
        };
        stats.record_outcome(Some(&direct));
        stats.record_outcome(Some(&searched));
        stats.record_outcome(None);
        assert_eq!(stats.matched_direct_link, 1);
        assert_eq!(stats.matched_label_cleaned, 1);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.match_rate(), 50.0);
    }

    #[test]
    fn test_record_resolution_counts_each_post_once() {
        let info = ExtractedInfo::new("Octex", "Bubblin", Source::Youtube);
        let matched = Resolution::Matched(MatchOutcome {
            track_id: "id".into(),
            info: info.clone(),
            strategy: Strategy::TitleReparse,
            query: Some("Bubblin".into()),
        });
        let mut stats = MatchingStats::default();
        for r in [Resolution::NonMusic, Resolution::NoTrack, Resolution::Unmatched(info), matched] {
            stats.record_resolution(&r);
        }
        assert_eq!(stats.rejected_non_music, 1);
        assert_eq!(stats.extracted, 2);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.matched_title_reparse, 1);
    }

    #[test]
    fn test_same_pair_ignores_case() {
        let a = ExtractedInfo::new("DJ Qu", "Prayer", Source::Youtube);
        let b = ExtractedInfo::new("dj qu ", "PRAYER", Source::Bandcamp);
        assert!(a.same_pair(&b));
    }
}
