//! Strategy-chain matcher.
//!
//! Each post goes through `Primary → TitleReparse → LabelCleaned`. Every
//! strategy yields an extraction (or nothing); its queries are issued in
//! order and the first accepted candidate ends the chain.

use crate::catalog::{CatalogSearch, ItemType, MetadataLookup};
use crate::config::MatchConfig;
use crate::diagnostics::Diagnostics;
use crate::classify::is_non_music_post;
use crate::extract::{
    extract_from_title, extract_music_info, extract_music_info_from_comment, with_upstream_pair,
};
use crate::label::clean_metadata_for_search;
use crate::models::{Comment, ExtractedInfo, MatchOutcome, RawPost, Resolution, Strategy};
use crate::queries::queries_for;
use crate::scoring::{find_best_remix_match, find_best_track_match};

pub struct Matcher<'a, S: CatalogSearch> {
    catalog: &'a S,
    metadata: Option<&'a dyn MetadataLookup>,
    config: MatchConfig,
    diag: Diagnostics,
}

impl<'a, S: CatalogSearch> Matcher<'a, S> {
    pub fn new(catalog: &'a S, config: MatchConfig) -> Self {
        let diag = Diagnostics::new(config.verbose);
        Self {
            catalog,
            metadata: None,
            config,
            diag,
        }
    }

    pub fn with_metadata(mut self, lookup: &'a dyn MetadataLookup) -> Self {
        self.metadata = Some(lookup);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    // ------------------------------------------------------------------------
    // Strategies
    // ------------------------------------------------------------------------

    /// Replace the title-derived pair with upstream metadata when a lookup is
    /// configured and answers.
    fn primary_info(&self, post: &RawPost, info: ExtractedInfo) -> ExtractedInfo {
        if info.spotify_id.is_some() {
            return info;
        }
        let Some(lookup) = self.metadata else {
            return info;
        };

        match lookup.lookup(&post.url) {
            Ok(Some((artist, track))) if !track.trim().is_empty() => {
                self.diag.trace(
                    "EXTRACT",
                    format_args!("upstream metadata: '{}' - '{}'", artist, track),
                );
                with_upstream_pair(&info, &artist, &track)
            }
            Ok(_) => info,
            Err(e) => {
                self.diag.warn(
                    "EXTRACT",
                    format_args!("metadata lookup failed for {}: {:#}", post.url, e),
                );
                info
            }
        }
    }

    fn extract_for(
        &self,
        strategy: Strategy,
        post: &RawPost,
        primary: &ExtractedInfo,
    ) -> Option<ExtractedInfo> {
        match strategy {
            Strategy::Primary => Some(primary.clone()),
            Strategy::TitleReparse => extract_from_title(&post.title, primary.source),
            Strategy::LabelCleaned => clean_metadata_for_search(primary, post),
        }
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Select a candidate id for one extraction. Returns the winning query,
    /// or None as the query when the id came straight from a track link.
    pub fn search_track(&self, info: &ExtractedInfo) -> Option<(String, Option<String>)> {
        if let Some(id) = &info.spotify_id {
            return Some((id.clone(), None));
        }

        let item_type = ItemType::Track;
        for query in queries_for(info) {
            let candidates = match self
                .catalog
                .search(&query, item_type, self.config.result_limit)
            {
                Ok(candidates) => candidates,
                Err(e) => {
                    self.diag.warn(
                        "SEARCH",
                        format_args!("{} query '{}' failed: {:#}", item_type.as_str(), query, e),
                    );
                    continue;
                }
            };
            if candidates.is_empty() {
                continue;
            }

            let best = match &info.remix {
                Some(credit) => find_best_remix_match(
                    &self.diag,
                    &candidates,
                    &info.artist,
                    &info.track,
                    &credit.remixer,
                    &credit.remix_type,
                ),
                None => find_best_track_match(&self.diag, &candidates, &info.artist, &info.track),
            };

            if let Some(candidate) = best {
                self.diag.trace(
                    "SEARCH",
                    format_args!("'{}' matched {} ({})", query, candidate.name, candidate.id),
                );
                return Some((candidate.id.clone(), Some(query)));
            }
        }
        None
    }

    /// Extract and run the strategy chain for one post, reporting how far it
    /// got. Extraction runs once; the classifier is consulted again only to
    /// label a post that yielded nothing.
    pub fn resolve_post(&self, post: &RawPost) -> Resolution {
        let Some(info) = extract_music_info(post) else {
            if is_non_music_post(&post.title) {
                return Resolution::NonMusic;
            }
            return Resolution::NoTrack;
        };
        let primary = self.primary_info(post, info);
        match self.run_chain(post, &primary) {
            Some(outcome) => Resolution::Matched(outcome),
            None => Resolution::Unmatched(primary),
        }
    }

    /// Matched outcome for one post, if any.
    pub fn resolve(&self, post: &RawPost) -> Option<MatchOutcome> {
        self.resolve_post(post).into_outcome()
    }

    fn run_chain(&self, post: &RawPost, primary: &ExtractedInfo) -> Option<MatchOutcome> {
        let mut tried: Vec<ExtractedInfo> = Vec::with_capacity(Strategy::CHAIN.len());

        for strategy in Strategy::CHAIN {
            let Some(info) = self.extract_for(strategy, post, primary) else {
                continue;
            };
            if tried.iter().any(|t| t.same_pair(&info)) {
                self.diag.trace(
                    "CHAIN",
                    format_args!("{:?} repeats an earlier pair, skipped", strategy),
                );
                continue;
            }

            if let Some((track_id, query)) = self.search_track(&info) {
                return Some(MatchOutcome {
                    track_id,
                    info,
                    strategy,
                    query,
                });
            }
            tried.push(info);
        }

        self.diag
            .trace("CHAIN", format_args!("no match for '{}'", post.title));
        None
    }

    /// Resolve a track mention from a discussion comment. Comments have no
    /// fallback chain.
    pub fn resolve_comment(&self, comment: &Comment) -> Option<MatchOutcome> {
        let info = extract_music_info_from_comment(comment)?;
        let (track_id, query) = self.search_track(&info)?;
        Some(MatchOutcome {
            track_id,
            info,
            strategy: Strategy::Primary,
            query,
        })
    }
}
