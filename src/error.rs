// src/error.rs
// =============================================================================
// Error and warning types for the whole library.
//
// Two families:
// - AggregateError: structural failures that abort the run (bad reference,
//   unknown repository, missing folder, listing failure, bad glob, write
//   failure). Nothing is assembled when one of these happens.
// - Warning: per-file problems that are reported and skipped. The run still
//   succeeds and the document simply leaves those files out.
//
// Every variant names the path or reference that failed so the message is
// useful without turning on debug logging.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::github::SourceError;

/// Fatal errors. Any of these aborts the aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("invalid repository reference '{reference}': expected owner/name[/subfolder]")]
    InvalidReference { reference: String },

    #[error("repository {owner}/{name} not found")]
    RepositoryNotFound { owner: String, name: String },

    #[error("could not access repository {owner}/{name}")]
    RepositoryAccess {
        owner: String,
        name: String,
        #[source]
        source: SourceError,
    },

    #[error("path '{path}' not found in repository")]
    PathNotFound { path: String },

    #[error("failed to list directory '{path}'")]
    TreeListing {
        path: String,
        #[source]
        source: SourceError,
    },

    #[error("invalid glob pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to write document to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal conditions collected while aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("no files matched the filters under '{root}'")]
    NoFilesDiscovered { root: String },

    #[error("skipping '{path}': no download reference")]
    MissingDownloadReference { path: String },

    #[error("skipping '{path}': {message}")]
    ContentFetch { path: String, message: String },
}

impl Warning {
    /// The repository path the warning is about.
    pub fn path(&self) -> &str {
        match self {
            Warning::NoFilesDiscovered { root } => root,
            Warning::MissingDownloadReference { path } => path,
            Warning::ContentFetch { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
