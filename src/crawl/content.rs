// src/crawl/content.rs
// =============================================================================
// Fetches the text of one file.
//
// A failure here never stops the run: the caller gets a Warning back, logs
// it, and moves on to the next file.
// =============================================================================

use crate::error::Warning;
use crate::github::{RemoteSource, TreeEntry};

pub struct ContentFetcher<'a, S: RemoteSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RemoteSource + ?Sized> ContentFetcher<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn fetch(&self, entry: &TreeEntry) -> Result<String, Warning> {
        let Some(download_ref) = entry.download_ref.as_deref() else {
            return Err(Warning::MissingDownloadReference {
                path: entry.path.clone(),
            });
        };

        self.source
            .fetch_content(download_ref)
            .await
            .map_err(|e| Warning::ContentFetch {
                path: entry.path.clone(),
                message: e.to_string(),
            })
    }
}
