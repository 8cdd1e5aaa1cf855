// src/crawl/observer.rs
// =============================================================================
// Progress hooks.
//
// The crawler and the pipeline call these at fixed points. Every method has
// an empty default, so an observer only implements what it cares about, and
// passing no observer at all is always fine.
// =============================================================================

use crate::error::Warning;
use crate::filter::Verdict;
use crate::github::TreeEntry;

pub trait CrawlObserver: Send + Sync {
    /// A directory was listed successfully.
    fn directory_listed(&self, _path: &str, _children: usize) {}

    /// A file passed the filters and will be fetched.
    fn entry_discovered(&self, _entry: &TreeEntry) {}

    /// A file was dropped by the filters.
    fn entry_filtered(&self, _entry: &TreeEntry, _verdict: Verdict) {}

    /// A file's content was added to the document under `index`.
    fn entry_fetched(&self, _index: usize, _entry: &TreeEntry) {}

    /// Something non-fatal happened and an entry (or the whole result) was
    /// skipped.
    fn entry_skipped(&self, _warning: &Warning) {}
}

/// Reports progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn directory_listed(&self, path: &str, children: usize) {
        tracing::debug!(path, children, "listed directory");
    }

    fn entry_discovered(&self, entry: &TreeEntry) {
        tracing::debug!(path = %entry.path, "discovered file");
    }

    fn entry_filtered(&self, entry: &TreeEntry, verdict: Verdict) {
        tracing::trace!(path = %entry.path, ?verdict, "filtered out");
    }

    fn entry_fetched(&self, index: usize, entry: &TreeEntry) {
        tracing::info!(index, path = %entry.path, "added file");
    }

    fn entry_skipped(&self, warning: &Warning) {
        tracing::warn!("{}", warning);
    }
}
