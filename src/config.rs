//! Matching configuration.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_UPVOTES: i64 = 3;
pub const DEFAULT_RECENT_WINDOW_HOURS: u64 = 24;
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Thresholds shared by post selection, discussion detection and the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub min_upvotes: i64,
    pub recent_window_hours: u64,
    /// Candidates requested per catalog query
    pub result_limit: usize,

    /// Thread needs strictly more comments than this
    pub discussion_min_comments: u32,
    /// Thread needs a strictly higher score than this
    pub discussion_min_score: i64,
    /// Share of comments that must name a track, inclusive
    pub discussion_min_density: f64,
    pub min_comment_score: i64,

    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_upvotes: DEFAULT_MIN_UPVOTES,
            recent_window_hours: DEFAULT_RECENT_WINDOW_HOURS,
            result_limit: DEFAULT_RESULT_LIMIT,
            discussion_min_comments: 20,
            discussion_min_score: 5,
            discussion_min_density: 0.25,
            min_comment_score: 2,
            verbose: false,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.result_limit == 0 {
            bail!("result_limit must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.discussion_min_density) {
            bail!(
                "discussion_min_density must be within [0, 1], got {}",
                self.discussion_min_density
            );
        }
        Ok(())
    }

    pub fn recent_window_secs(&self) -> i64 {
        (self.recent_window_hours as i64).saturating_mul(3600)
    }
}
