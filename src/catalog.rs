//! Collaborator seams: catalog search and upstream metadata lookup.
//!
//! The matcher only sees these traits. `ReplayCatalog` answers from recorded
//! search results so batches can be re-scored offline.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

use crate::models::CandidateTrack;

/// Item kind requested from the catalog. Only tracks are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Track,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Track => "track",
        }
    }
}

/// Full-text catalog search. Result order is the catalog's own relevance.
pub trait CatalogSearch: Send + Sync {
    fn search(&self, query: &str, item_type: ItemType, limit: usize) -> Result<Vec<CandidateTrack>>;
}

/// Upstream (artist, track) for a post link, e.g. a scraped page title.
pub trait MetadataLookup: Send + Sync {
    fn lookup(&self, url: &str) -> Result<Option<(String, String)>>;
}

/// Recorded query → candidates table. Unknown queries return no results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ReplayCatalog {
    responses: FxHashMap<String, Vec<CandidateTrack>>,
}

impl ReplayCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, query: &str, candidates: Vec<CandidateTrack>) -> Self {
        self.responses.insert(query.to_string(), candidates);
        self
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog replay file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog replay file {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl CatalogSearch for ReplayCatalog {
    fn search(&self, query: &str, _item_type: ItemType, limit: usize) -> Result<Vec<CandidateTrack>> {
        Ok(self
            .responses
            .get(query)
            .map(|c| c.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_truncates_to_limit() {
        let catalog = ReplayCatalog::new().with_response(
            "Burial Archangel",
            vec![
                CandidateTrack::new("a", "Archangel", &["Burial"]),
                CandidateTrack::new("b", "Archangel (Live)", &["Burial"]),
            ],
        );
        let results = catalog.search("Burial Archangel", ItemType::Track, 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[test]
    fn test_replay_unknown_query_is_empty() {
        let catalog = ReplayCatalog::new();
        assert!(catalog.search("nothing", ItemType::Track, 10).unwrap().is_empty());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_replay_deserializes_query_map() {
        let json = r#"{"\"Octex\" \"Bubblin\"": [{"id": "x", "name": "Bubblin", "artists": [{"name": "Octex"}]}]}"#;
        let catalog: ReplayCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let hits = catalog.search("\"Octex\" \"Bubblin\"", ItemType::Track, 10).unwrap();
        assert_eq!(hits[0].primary_artist(), Some("Octex"));
    }

    #[test]
    fn test_from_path_missing_file_has_context() {
        let err = ReplayCatalog::from_path(Path::new("/nonexistent/replay.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog replay file"));
    }

    #[test]
    fn test_item_type_name() {
        assert_eq!(ItemType::Track.as_str(), "track");
    }
}
