//! Post selection and discussion-thread detection.
//!
//! Busy threads where commenters trade tracks are a second source of
//! mentions. A thread qualifies on comment count, score and the share of
//! comments that actually name a track.

use crate::config::MatchConfig;
use crate::extract::extract_music_info_from_comment;
use crate::models::{Comment, RawPost};

/// Posts with enough upvotes created inside the recent window.
///
/// A missing score counts as 0; a missing creation time is kept.
pub fn select_recent_posts<'a>(posts: &'a [RawPost], now_unix: i64, config: &MatchConfig) -> Vec<&'a RawPost> {
    let cutoff = now_unix.saturating_sub(config.recent_window_secs());
    posts
        .iter()
        .filter(|p| p.score.unwrap_or(0) >= config.min_upvotes)
        .filter(|p| p.created.map_or(true, |created| created >= cutoff))
        .collect()
}

/// Fraction of comments that yield a track mention. 0.0 for no comments.
pub fn track_sharing_density(comments: &[Comment]) -> f64 {
    if comments.is_empty() {
        return 0.0;
    }
    let sharing = comments
        .iter()
        .filter(|c| extract_music_info_from_comment(c).is_some())
        .count();
    sharing as f64 / comments.len() as f64
}

/// Comment count and score are strict thresholds; density is inclusive.
/// Falls back to the loaded comments when `num_comments` is missing.
pub fn is_discussion_thread(post: &RawPost, comments: &[Comment], config: &MatchConfig) -> bool {
    let num_comments = post.num_comments.unwrap_or(comments.len() as u32);
    if num_comments <= config.discussion_min_comments {
        return false;
    }
    if post.score.unwrap_or(0) <= config.discussion_min_score {
        return false;
    }
    track_sharing_density(comments) >= config.discussion_min_density
}

pub fn qualifying_comments<'a>(comments: &'a [Comment], config: &MatchConfig) -> Vec<&'a Comment> {
    comments
        .iter()
        .filter(|c| c.score >= config.min_comment_score)
        .collect()
}
