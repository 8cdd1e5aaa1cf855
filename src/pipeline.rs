// src/pipeline.rs
// =============================================================================
// The end-to-end flow:
//
//   resolve repository -> compile filters -> crawl tree
//       -> fetch each file (one at a time) -> append to document -> finish
//
// Structural failures (bad reference, unknown repo, missing folder, listing
// error) abort everything and nothing is assembled. Per-file problems become
// warnings: the file is left out and we carry on.
// =============================================================================

use std::path::PathBuf;

use crate::crawl::{ContentFetcher, CrawlObserver, TreeCrawler};
use crate::document::{forbidden_chars, DocumentAssembler, DocumentOutput};
use crate::error::{Result, Warning};
use crate::filter::{FilterSpec, PatternFilter};
use crate::github::{resolve_repository, RemoteSource, RepoReference, TreeEntry};

/// Everything one aggregation run needs.
#[derive(Debug, Clone)]
pub struct AggregateRequest {
    pub reference: RepoReference,
    pub filter: FilterSpec,
    /// Write the document here instead of returning it
    pub destination: Option<PathBuf>,
}

impl AggregateRequest {
    pub fn new(reference: RepoReference) -> Self {
        Self {
            reference,
            filter: FilterSpec::default(),
            destination: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_destination(mut self, destination: Option<PathBuf>) -> Self {
        self.destination = destination;
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct AggregateReport {
    /// The reference with canonical owner/name casing
    pub repository: RepoReference,
    /// Files that passed the filters
    pub discovered: usize,
    /// Files that made it into the document
    pub emitted: usize,
    pub warnings: Vec<Warning>,
    pub output: DocumentOutput,
}

pub async fn aggregate<S>(
    source: &S,
    request: &AggregateRequest,
    observer: Option<&dyn CrawlObserver>,
) -> Result<AggregateReport>
where
    S: RemoteSource + ?Sized,
{
    let mut warnings = Vec::new();
    let (repository, files) =
        discover(source, &request.reference, &request.filter, observer).await?;

    if files.is_empty() {
        report(
            &mut warnings,
            observer,
            Warning::NoFilesDiscovered {
                root: repository.to_string(),
            },
        );
    }

    let fetcher = ContentFetcher::new(source);
    let mut assembler = DocumentAssembler::new();

    for entry in &files {
        match fetcher.fetch(entry).await {
            Ok(content) => {
                let replaced = forbidden_chars(&content);
                if replaced > 0 {
                    tracing::warn!(
                        path = %entry.path,
                        replaced,
                        "content has characters XML can't hold, replaced with U+FFFD"
                    );
                }
                let index = assembler.append(&entry.path, content);
                if let Some(observer) = observer {
                    observer.entry_fetched(index, entry);
                }
            }
            Err(warning) => report(&mut warnings, observer, warning),
        }
    }

    if assembler.is_empty() && !files.is_empty() {
        tracing::warn!(matched = files.len(), "every matched file was skipped");
    }
    let emitted = assembler.len();
    let output = assembler.finish(request.destination.as_deref()).await?;

    Ok(AggregateReport {
        repository,
        discovered: files.len(),
        emitted,
        warnings,
        output,
    })
}

/// Resolves the repository and crawls it without fetching any content.
pub async fn list_files<S>(
    source: &S,
    reference: &RepoReference,
    filter: &FilterSpec,
    observer: Option<&dyn CrawlObserver>,
) -> Result<Vec<TreeEntry>>
where
    S: RemoteSource + ?Sized,
{
    let (_, files) = discover(source, reference, filter, observer).await?;
    Ok(files)
}

async fn discover<S>(
    source: &S,
    reference: &RepoReference,
    filter: &FilterSpec,
    observer: Option<&dyn CrawlObserver>,
) -> Result<(RepoReference, Vec<TreeEntry>)>
where
    S: RemoteSource + ?Sized,
{
    let repository = resolve_repository(source, reference).await?;
    let filter = PatternFilter::new(filter)?;

    let mut crawler = TreeCrawler::new(source, &repository, &filter);
    if let Some(observer) = observer {
        crawler = crawler.with_observer(observer);
    }
    let files = crawler.crawl(&repository.subfolder).await?;

    tracing::info!(repository = %repository, files = files.len(), "crawl complete");
    Ok((repository, files))
}

fn report(
    warnings: &mut Vec<Warning>,
    observer: Option<&dyn CrawlObserver>,
    warning: Warning,
) {
    if let Some(observer) = observer {
        observer.entry_skipped(&warning);
    }
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::InMemorySource;

    #[tokio::test]
    async fn test_skipped_files_do_not_use_an_index() {
        let source = InMemorySource::new("acme", "widgets")
            .with_file("a.txt", "a")
            .with_failing_fetch("b.txt")
            .with_undownloadable_file("c.txt")
            .with_file("d.txt", "d");
        let request = AggregateRequest::new(RepoReference::new("acme", "widgets", ""));

        let report = aggregate(&source, &request, None).await.unwrap();
        assert_eq!(report.discovered, 4);
        assert_eq!(report.emitted, 2);
        assert_eq!(report.warnings.len(), 2);

        let DocumentOutput::Text(text) = report.output else {
            panic!("expected text output");
        };
        assert!(text.contains("<document index=\"1\">\n<source>a.txt</source>"));
        assert!(text.contains("<document index=\"2\">\n<source>d.txt</source>"));
        assert!(!text.contains("index=\"3\""));
    }

    #[tokio::test]
    async fn test_invalid_pattern_fails_before_crawling() {
        let source = InMemorySource::new("acme", "widgets").with_file("a.txt", "a");
        let request = AggregateRequest::new(RepoReference::new("acme", "widgets", ""))
            .with_filter(FilterSpec::new(vec!["[".to_string()], vec![]));

        let err = aggregate(&source, &request, None).await.unwrap_err();
        assert!(matches!(err, crate::AggregateError::InvalidPattern { .. }));
        assert!(source.listed_paths().is_empty());
    }
}
