//! Music post matching library: title extraction, query generation and
//! candidate selection against a track catalog.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod discussion;
pub mod extract;
pub mod label;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod queries;
pub mod remix;
pub mod scoring;
pub mod split;
