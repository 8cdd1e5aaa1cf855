// src/github/mod.rs
// =============================================================================
// This module is everything that talks to the remote repository host.
//
// Contents:
// - RemoteSource: the three capabilities the aggregator needs (repository
//   metadata, directory listing, file content). The crawler only ever sees
//   this trait, so tests can swap in an in-memory source.
// - fetch: GitHubClient, the real implementation over the REST API
// - reference: parsing "owner/name/sub" slugs and URLs, and resolving the
//   canonical owner/name casing
// - memory: InMemorySource for tests
//
// Rust concepts:
// - Traits: A shared interface that several types implement
// - async-trait: Lets trait methods be async
// - Enums with data: EntryKind, SourceError
// =============================================================================

mod fetch;
#[cfg(any(test, feature = "test-export-mocks"))]
mod memory;
mod reference;

use async_trait::async_trait;
use thiserror::Error;

pub use fetch::GitHubClient;
#[cfg(any(test, feature = "test-export-mocks"))]
pub use memory::InMemorySource;
pub use reference::{resolve_repository, RepoReference};

// What a listed child is. Symlinks and submodules are reported as files;
// the crawler never descends into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child returned by a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Last path segment, as the host spells it
    pub name: String,
    /// Path relative to the repository root, '/' separated
    pub path: String,
    pub kind: EntryKind,
    /// Where the raw content can be fetched from. Absent for directories and
    /// for entries the host cannot serve (e.g. submodules).
    pub download_ref: Option<String>,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Canonical owner/name as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoMetadata {
    pub owner: String,
    pub name: String,
}

/// Errors a remote source can report.
///
/// `NotFound` is kept apart from everything else because the crawler reacts
/// to it (case fallback) instead of just failing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token contains characters not allowed in an HTTP header")]
    InvalidCredential,
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}

/// The capabilities the aggregator consumes from a repository host.
///
/// Implementations must always return listings as a sequence, even when the
/// host answers a single object.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepoMetadata, SourceError>;

    /// Lists the direct children of `path` ("" is the repository root) at
    /// the reference's git ref, or the default branch when it has none.
    async fn list_directory(
        &self,
        repo: &RepoReference,
        path: &str,
    ) -> Result<Vec<TreeEntry>, SourceError>;

    async fn fetch_content(&self, download_ref: &str) -> Result<String, SourceError>;
}
