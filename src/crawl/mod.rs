// src/crawl/mod.rs
// =============================================================================
// This module walks a repository and pulls down the files we keep.
//
// Submodules:
// - tree: TreeCrawler, depth-first listing with a case-insensitive retry
//   when a folder name was typed in the wrong case
// - content: ContentFetcher, fetches one file's text
// - observer: hooks for progress reporting (optional)
//
// Everything runs one request at a time. That keeps us well inside GitHub's
// rate limits and makes the output order exactly the listing order.
// =============================================================================

mod content;
mod observer;
mod tree;

pub use content::ContentFetcher;
pub use observer::{CrawlObserver, TracingObserver};
pub use tree::TreeCrawler;
