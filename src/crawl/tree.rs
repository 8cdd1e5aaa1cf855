// src/crawl/tree.rs
// =============================================================================
// This module lists every file under a folder of a repository.
//
// How it works:
// 1. List the folder's direct children
// 2. Directories: recurse right away (depth-first, in listing order)
// 3. Files: run them through the PatternFilter, keep the ones that pass
// 4. If the START folder is 404, the user may have typed it in the wrong
//    case ("Examples" vs "examples"). GitHub paths are case-sensitive, so we
//    list the parent once, look for a directory with the same name ignoring
//    case, and retry with the real spelling. That retry happens at most once.
// 5. Any other listing failure stops the crawl.
//
// Rust concepts:
// - BoxFuture: async fns can't call themselves directly (the future would
//   have infinite size), so the recursive step returns a boxed future
// - Lifetimes: the crawler only borrows the source, repo and filter
// =============================================================================

use futures::future::BoxFuture;

use super::CrawlObserver;
use crate::error::{AggregateError, Result};
use crate::filter::{PatternFilter, Verdict};
use crate::github::{EntryKind, RemoteSource, RepoReference, SourceError, TreeEntry};

pub struct TreeCrawler<'a, S: RemoteSource + ?Sized> {
    source: &'a S,
    repo: &'a RepoReference,
    filter: &'a PatternFilter,
    observer: Option<&'a dyn CrawlObserver>,
}

impl<'a, S: RemoteSource + ?Sized> TreeCrawler<'a, S> {
    pub fn new(source: &'a S, repo: &'a RepoReference, filter: &'a PatternFilter) -> Self {
        Self {
            source,
            repo,
            filter,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn CrawlObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Returns the files under `root` ("" for the repository root) that pass
    /// the filter, in depth-first listing order. Directories are never
    /// returned.
    pub async fn crawl(&self, root: &str) -> Result<Vec<TreeEntry>> {
        let root = root.trim_matches('/').to_string();
        let mut files = Vec::new();
        self.walk(root, true, &mut files).await?;
        tracing::debug!(files = files.len(), "crawl finished");
        Ok(files)
    }

    fn walk<'s>(
        &'s self,
        path: String,
        allow_case_fallback: bool,
        files: &'s mut Vec<TreeEntry>,
    ) -> BoxFuture<'s, Result<()>> {
        Box::pin(async move {
            let children = match self.list(&path).await {
                Ok(children) => children,
                Err(SourceError::NotFound { .. }) if allow_case_fallback && !path.is_empty() => {
                    let actual = self.find_case_insensitive(&path).await?;
                    tracing::info!(requested = %path, actual = %actual, "corrected path casing");
                    return self.walk(actual, false, files).await;
                }
                Err(SourceError::NotFound { .. }) => {
                    return Err(AggregateError::PathNotFound { path });
                }
                Err(source) => return Err(AggregateError::TreeListing { path, source }),
            };

            if let Some(observer) = self.observer {
                observer.directory_listed(&path, children.len());
            }

            for child in children {
                match child.kind {
                    EntryKind::Directory => {
                        self.walk(child.path.clone(), false, &mut *files).await?;
                    }
                    EntryKind::File => self.consider(child, files),
                }
            }
            Ok(())
        })
    }

    fn consider(&self, entry: TreeEntry, files: &mut Vec<TreeEntry>) {
        match self.filter.evaluate(&entry.name) {
            Verdict::Included => {
                if let Some(observer) = self.observer {
                    observer.entry_discovered(&entry);
                }
                files.push(entry);
            }
            verdict => {
                if let Some(observer) = self.observer {
                    observer.entry_filtered(&entry, verdict);
                }
            }
        }
    }

    async fn list(&self, path: &str) -> std::result::Result<Vec<TreeEntry>, SourceError> {
        self.source.list_directory(self.repo, path).await
    }

    // Lists the parent of `path` and returns the path of the first directory
    // whose name equals the last segment of `path` ignoring case.
    async fn find_case_insensitive(&self, path: &str) -> Result<String> {
        let (parent, leaf) = path.rsplit_once('/').unwrap_or(("", path));

        let siblings = match self.list(parent).await {
            Ok(siblings) => siblings,
            Err(SourceError::NotFound { .. }) => {
                return Err(AggregateError::PathNotFound {
                    path: path.to_string(),
                })
            }
            Err(source) => {
                return Err(AggregateError::TreeListing {
                    path: parent.to_string(),
                    source,
                })
            }
        };

        let wanted = leaf.to_lowercase();
        siblings
            .into_iter()
            .find(|entry| entry.is_dir() && entry.name.to_lowercase() == wanted)
            .map(|entry| entry.path)
            .ok_or_else(|| AggregateError::PathNotFound {
                path: path.to_string(),
            })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Box::pin(async move { ... })?
//    - An async fn compiles to a state machine that contains the state of
//      every future it awaits
//    - If it awaits itself, that state machine would contain itself: the size
//      would be infinite and the compiler refuses it
//    - Boxing puts the inner future on the heap, so the outer one only holds
//      a pointer
//
// 2. What is `&mut *files`?
//    - A "reborrow": a fresh, shorter mutable borrow of the same Vec
//    - It lets the recursive call use `files` and gives it back afterwards
//
// 3. Why `S: RemoteSource + ?Sized`?
//    - ?Sized allows S to be a trait object (dyn RemoteSource) as well as a
//      concrete type like GitHubClient
// -----------------------------------------------------------------------------
