// src/lib.rs
// =============================================================================
// repo-bundle: turn a GitHub repository (or a folder in it) into one XML
// document that downstream tools, typically LLM prompts, can consume.
//
// Modules, from the bottom up:
// - filter:   include/exclude globs on file names
// - github:   the RemoteSource trait, the GitHub client, repo references
// - crawl:    recursive tree listing, content fetching, progress hooks
// - document: XML assembly and escaping
// - pipeline: the whole flow in one call (aggregate / list_files)
// =============================================================================

pub mod config;
pub mod crawl;
pub mod document;
pub mod error;
pub mod filter;
pub mod github;
pub mod pipeline;

pub use config::ClientConfig;
pub use crawl::{ContentFetcher, CrawlObserver, TracingObserver, TreeCrawler};
pub use document::{DocumentAssembler, DocumentEntry, DocumentOutput};
pub use error::{AggregateError, Result, Warning};
pub use filter::{FilterSpec, PatternFilter, Verdict, DEFAULT_EXCLUDES};
#[cfg(any(test, feature = "test-export-mocks"))]
pub use github::InMemorySource;
pub use github::{
    resolve_repository, EntryKind, GitHubClient, RemoteSource, RepoMetadata, RepoReference,
    SourceError, TreeEntry,
};
pub use pipeline::{aggregate, list_files, AggregateReport, AggregateRequest};
