use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use overload_match::catalog::{CatalogSearch, ReplayCatalog};
use overload_match::config::{
    MatchConfig, DEFAULT_MIN_UPVOTES, DEFAULT_RECENT_WINDOW_HOURS, DEFAULT_RESULT_LIMIT,
};
use overload_match::discussion::{is_discussion_thread, qualifying_comments, select_recent_posts};
use overload_match::models::{MatchOutcome, MatchingStats, RawPost};
use overload_match::pipeline::Matcher;
use overload_match::progress::{create_progress_bar, create_spinner, format_duration, log_progress};

#[derive(Parser)]
#[command(name = "overload-match")]
#[command(about = "Match music post titles against a track catalog, one JSON decision per post")]
struct Args {
    /// JSON array of posts
    posts: PathBuf,

    /// Recorded catalog responses keyed by query string
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Log per-candidate scoring detail
    #[arg(long)]
    verbose: bool,

    /// Hide progress bars and log progress lines instead
    #[arg(long)]
    log_only: bool,

    /// Write run statistics as JSON
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Reference unix time for the recency window (default: now)
    #[arg(long)]
    now: Option<i64>,

    #[arg(long, env = "MIN_UPVOTES", default_value_t = DEFAULT_MIN_UPVOTES)]
    min_upvotes: i64,

    #[arg(long, env = "RESULT_LIMIT", default_value_t = DEFAULT_RESULT_LIMIT)]
    result_limit: usize,

    #[arg(long, env = "RECENT_WINDOW_HOURS", default_value_t = DEFAULT_RECENT_WINDOW_HOURS)]
    recent_window_hours: u64,
}

const PROGRESS_LOG_INTERVAL: u64 = 100;

/// One output line.
#[derive(Serialize)]
struct PostDecision<'a> {
    id: Option<&'a str>,
    title: &'a str,
    #[serde(rename = "match")]
    outcome: Option<MatchOutcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    comment_matches: Vec<MatchOutcome>,
}

fn init_logging(verbose: bool) {
    let mut clog = colog::default_builder();
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    clog.filter(None, level);
    clog.init();
}

fn load_posts(path: &Path) -> Result<Vec<RawPost>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read posts file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse posts file {}", path.display()))
}

fn unix_now() -> Result<i64> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the unix epoch")?
        .as_secs();
    Ok(secs as i64)
}

fn process_post<'p, S: CatalogSearch>(matcher: &Matcher<'_, S>, post: &'p RawPost) -> (PostDecision<'p>, MatchingStats) {
    let mut stats = MatchingStats::default();

    let resolution = matcher.resolve_post(post);
    stats.record_resolution(&resolution);
    let outcome = resolution.into_outcome();

    let mut comment_matches = Vec::new();
    if is_discussion_thread(post, &post.comments, matcher.config()) {
        stats.discussion_threads += 1;
        for comment in qualifying_comments(&post.comments, matcher.config()) {
            stats.comments_considered += 1;
            if let Some(found) = matcher.resolve_comment(comment) {
                stats.comment_matches += 1;
                comment_matches.push(found);
            }
        }
    }

    let decision = PostDecision {
        id: post.id.as_deref(),
        title: &post.title,
        outcome,
        comment_matches,
    };
    (decision, stats)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let config = MatchConfig {
        min_upvotes: args.min_upvotes,
        result_limit: args.result_limit,
        recent_window_hours: args.recent_window_hours,
        verbose: args.verbose,
        ..Default::default()
    };
    config.validate().context("Invalid matching configuration")?;

    let start = Instant::now();

    let spinner = create_spinner("Loading inputs", args.log_only);
    let posts = load_posts(&args.posts)?;
    let catalog = match &args.catalog {
        Some(path) => ReplayCatalog::from_path(path)?,
        None => {
            log::warn!("No catalog given; only direct track links can resolve");
            ReplayCatalog::new()
        }
    };
    spinner.finish_with_message(format!(
        "Loaded {} posts, {} recorded queries",
        posts.len(),
        catalog.len()
    ));

    let now = match args.now {
        Some(now) => now,
        None => unix_now()?,
    };
    let recent = select_recent_posts(&posts, now, &config);
    log::info!(
        "{} of {} posts are recent with at least {} upvotes",
        recent.len(),
        posts.len(),
        config.min_upvotes
    );

    let matcher = Matcher::new(&catalog, config);
    let total = recent.len() as u64;
    let pb = create_progress_bar(total, "Matching posts", args.log_only);

    let results: Vec<(PostDecision, MatchingStats)> = recent
        .par_iter()
        .map(|post| {
            let result = process_post(&matcher, post);
            pb.inc(1);
            log_progress("MATCH", pb.position(), total, PROGRESS_LOG_INTERVAL, args.log_only);
            result
        })
        .collect();
    pb.finish_with_message("Matching complete");

    let mut stats = MatchingStats {
        posts_seen: posts.len(),
        posts_recent: recent.len(),
        ..Default::default()
    };
    for (decision, post_stats) in &results {
        stats.merge(post_stats);
        println!(
            "{}",
            serde_json::to_string(decision).context("Failed to serialize decision")?
        );
    }

    let elapsed = start.elapsed();
    stats.elapsed_seconds = elapsed.as_secs_f64();
    stats.log_phase("match");
    matcher.diagnostics().info(
        "MATCH",
        format_args!(
            "Matched {}/{} extracted posts ({:.1}%) in {}",
            stats.total_matches(),
            stats.extracted,
            stats.match_rate(),
            format_duration(elapsed)
        ),
    );

    if let Some(path) = &args.stats {
        stats
            .write_to_file(path)
            .with_context(|| format!("Failed to write stats to {}", path.display()))?;
    }

    Ok(())
}
