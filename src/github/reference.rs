// src/github/reference.rs
// =============================================================================
// Repository references: what the user typed, and what GitHub calls it.
//
// Supported input formats:
//   - owner/name
//   - owner/name/sub/folder
//   - https://github.com/owner/name(.git)
//   - github.com/owner/name/tree/<ref>/sub/folder
//
// Resolving asks GitHub for the repository and takes owner/name back in the
// exact casing GitHub reports. Existence checks are case-insensitive on
// GitHub, but the contents API is case-sensitive, so "Acme/Widgets" would
// otherwise work for the first call and 404 on the next one.
// =============================================================================

use std::fmt;

use super::{RemoteSource, SourceError};
use crate::error::{AggregateError, Result};

/// A repository plus an optional folder inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
    pub owner: String,
    pub name: String,
    /// Folder to start from, '/' separated, "" for the repository root
    pub subfolder: String,
    /// Branch/tag picked up from a `/tree/<ref>/` URL
    pub git_ref: Option<String>,
}

impl RepoReference {
    pub fn new(owner: &str, name: &str, subfolder: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            subfolder: subfolder.trim_matches('/').to_string(),
            git_ref: None,
        }
    }

    // Parses a slug or a GitHub URL. Nothing here touches the network.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || AggregateError::InvalidReference {
            reference: input.to_string(),
        };

        let (path, is_url) = strip_github_host(input.trim()).ok_or_else(invalid)?;

        // Empty segments come from "//" or a trailing "/" and carry no meaning
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(invalid());
        }

        let owner = segments[0];
        let name = if is_url {
            segments[1].trim_end_matches(".git")
        } else {
            segments[1]
        };
        if !is_valid_name(owner) || !is_valid_name(name) {
            return Err(invalid());
        }

        let mut rest = &segments[2..];
        let mut git_ref = None;
        if is_url && rest.len() >= 2 && matches!(rest[0], "tree" | "blob") {
            git_ref = Some(rest[1].to_string());
            rest = &rest[2..];
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            subfolder: rest.join("/"),
            git_ref,
        })
    }

    /// "owner/name"
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)?;
        if !self.subfolder.is_empty() {
            write!(f, "/{}", self.subfolder)?;
        }
        Ok(())
    }
}

// Returns the part after "github.com/" for URLs, or the input unchanged for
// slugs. Any other host is rejected.
fn strip_github_host(input: &str) -> Option<(&str, bool)> {
    let url = input
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    if let Some(path) = url.strip_prefix("github.com/") {
        return Some((path, true));
    }
    if input.contains("://") {
        return None;
    }
    Some((input, false))
}

// GitHub owner and repository names only use ASCII letters, digits, '-',
// '_' and '.'.
fn is_valid_name(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Confirms the repository exists and returns the reference with GitHub's
/// canonical owner/name casing. Subfolder and git ref are carried over.
pub async fn resolve_repository<S>(source: &S, reference: &RepoReference) -> Result<RepoReference>
where
    S: RemoteSource + ?Sized,
{
    match source.get_repository(&reference.owner, &reference.name).await {
        Ok(metadata) => {
            if metadata.owner != reference.owner || metadata.name != reference.name {
                let canonical = format!("{}/{}", metadata.owner, metadata.name);
                tracing::info!(
                    requested = %reference.slug(),
                    %canonical,
                    "corrected repository casing"
                );
            }
            Ok(RepoReference {
                owner: metadata.owner,
                name: metadata.name,
                ..reference.clone()
            })
        }
        Err(SourceError::NotFound { .. }) => Err(AggregateError::RepositoryNotFound {
            owner: reference.owner.clone(),
            name: reference.name.clone(),
        }),
        Err(source) => Err(AggregateError::RepositoryAccess {
            owner: reference.owner.clone(),
            name: reference.name.clone(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::InMemorySource;

    #[test]
    fn test_parse_slug() {
        let reference = RepoReference::parse("acme/widgets").unwrap();
        assert_eq!(reference, RepoReference::new("acme", "widgets", ""));
    }

    #[test]
    fn test_parse_slug_with_subfolder() {
        let reference = RepoReference::parse("acme/widgets/src/core/").unwrap();
        assert_eq!(reference.subfolder, "src/core");
        assert_eq!(reference.to_string(), "acme/widgets/src/core");
    }

    #[test]
    fn test_parse_github_url() {
        let reference = RepoReference::parse("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(reference.owner, "rust-lang");
        assert_eq!(reference.name, "rust");
        assert_eq!(reference.subfolder, "");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let reference = RepoReference::parse("https://github.com/user/repo.git").unwrap();
        assert_eq!(reference.owner, "user");
        assert_eq!(reference.name, "repo");
    }

    #[test]
    fn test_parse_tree_url() {
        let reference =
            RepoReference::parse("github.com/acme/widgets/tree/release/docs/guide").unwrap();
        assert_eq!(reference.git_ref.as_deref(), Some("release"));
        assert_eq!(reference.subfolder, "docs/guide");
    }

    #[test]
    fn test_parse_invalid_url() {
        let result = RepoReference::parse("https://gitlab.com/user/repo");
        assert!(matches!(result, Err(AggregateError::InvalidReference { .. })));
    }

    #[test]
    fn test_parse_needs_owner_and_name() {
        for input in ["", "acme", "acme/", "/widgets", "github.com/acme", "acme/../x"] {
            assert!(
                matches!(
                    RepoReference::parse(input),
                    Err(AggregateError::InvalidReference { .. })
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_corrects_casing() {
        let source = InMemorySource::new("Acme", "Widgets").with_file("README.md", "hi");
        let mut requested = RepoReference::new("acme", "WIDGETS", "docs");
        requested.git_ref = Some("main".to_string());

        let resolved = resolve_repository(&source, &requested).await.unwrap();
        assert_eq!(resolved.owner, "Acme");
        assert_eq!(resolved.name, "Widgets");
        assert_eq!(resolved.subfolder, "docs");
        assert_eq!(resolved.git_ref.as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let source = InMemorySource::new("acme", "widgets");
        let err = resolve_repository(&source, &RepoReference::new("acme", "gadgets", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AggregateError::RepositoryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_access_error_keeps_cause() {
        let source = InMemorySource::new("acme", "widgets").with_repository_error(401);
        let err = resolve_repository(&source, &RepoReference::new("acme", "widgets", ""))
            .await
            .unwrap_err();
        match err {
            AggregateError::RepositoryAccess { source, .. } => {
                assert!(matches!(source, SourceError::Status { status: 401, .. }))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
