// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Endpoints used:
// - GET /repos/{owner}/{name}                 -> canonical owner/name casing
// - GET /repos/{owner}/{name}/contents/{path} -> directory listing
// - GET {download_url}                        -> raw file content
//
// Notes:
// - GitHub answers the contents endpoint with a single object instead of an
//   array when {path} is a file. We normalize that here so the rest of the
//   crate always gets a Vec.
// - Without a token only public repos are visible and the rate limit is
//   much lower (60 requests/hour). That's the caller's business; we just
//   send the token when we have one.
//
// Rust concepts:
// - serde untagged enums: Accept "array OR object" in one type
// - reqwest default headers: Set auth/user-agent once on the client
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{EntryKind, RemoteSource, RepoMetadata, RepoReference, SourceError, TreeEntry};
use crate::config::ClientConfig;

// GitHub's JSON media type
const GITHUB_JSON: &str = "application/vnd.github+json";

/// RemoteSource backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: ClientConfig,
}

impl GitHubClient {
    // Builds one reqwest client for the whole run; reqwest pools
    // connections internally so every request reuses it.
    pub fn new(config: ClientConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| SourceError::InvalidCredential)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    // Appends path segments to the API base. Each segment is percent-encoded
    // by `url`, so names with spaces or '#' survive.
    fn api_url<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Url {
        let mut url = self.config.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn contents_url(&self, repo: &RepoReference, path: &str) -> Url {
        let segments = ["repos", repo.owner.as_str(), repo.name.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let mut url = self.api_url(segments);
        if let Some(git_ref) = repo.git_ref.as_deref().filter(|r| !r.is_empty()) {
            url.query_pairs_mut().append_pair("ref", git_ref);
        }
        url
    }
}

#[async_trait]
impl RemoteSource for GitHubClient {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepoMetadata, SourceError> {
        let url = self.api_url(["repos", owner, name]);
        tracing::debug!(%url, "fetching repository metadata");

        let response = self.client.get(url).send().await?;
        let response = check_status(response, &format!("repository {}/{}", owner, name)).await?;
        let payload: RepoPayload = response.json().await?;

        Ok(RepoMetadata {
            owner: payload.owner.login,
            name: payload.name,
        })
    }

    async fn list_directory(
        &self,
        repo: &RepoReference,
        path: &str,
    ) -> Result<Vec<TreeEntry>, SourceError> {
        let url = self.contents_url(repo, path);
        tracing::debug!(%url, "listing directory");

        let response = self.client.get(url).send().await?;
        let response = check_status(response, &format!("path '{}'", path)).await?;
        let listing: ContentListing = response.json().await?;

        Ok(listing.into_entries())
    }

    async fn fetch_content(&self, download_ref: &str) -> Result<String, SourceError> {
        tracing::debug!(url = download_ref, "fetching file content");

        let response = self.client.get(download_ref).send().await?;
        let response = check_status(response, download_ref).await?;
        Ok(response.text().await?)
    }
}

// Turns non-2xx responses into SourceError. 404 gets its own variant; for
// everything else we keep GitHub's "message" field when the body has one.
async fn check_status(response: Response, resource: &str) -> Result<Response, SourceError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound {
            resource: resource.to_string(),
        });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            message: error_message(status, &body),
        });
    }

    Ok(response)
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(api) = serde_json::from_str::<ApiMessage>(body) {
        return api.message;
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status.canonical_reason().unwrap_or("unexpected status").to_string()
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

// The contents endpoint returns an array for directories and a bare object
// for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentListing {
    Many(Vec<ContentItem>),
    One(ContentItem),
}

impl ContentListing {
    fn into_entries(self) -> Vec<TreeEntry> {
        match self {
            ContentListing::Many(items) => items.into_iter().map(TreeEntry::from).collect(),
            ContentListing::One(item) => vec![TreeEntry::from(item)],
        }
    }
}

impl From<ContentItem> for TreeEntry {
    fn from(item: ContentItem) -> Self {
        let kind = if item.kind == "dir" {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let download_ref = match kind {
            EntryKind::Directory => None,
            EntryKind::File => item.download_url,
        };
        TreeEntry {
            name: item.name,
            path: item.path,
            kind,
            download_ref,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(untagged)] do?
//    - serde tries each variant in order and keeps the first that parses
//    - A JSON array parses as Many, a JSON object falls through to One
//
// 2. Why `?` on reqwest calls in a function returning SourceError?
//    - SourceError::Transport has #[from] reqwest::Error, so `?` converts
//      the error for us
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_listing_array() {
        let json = r#"[
            {"name": "src", "path": "src", "type": "dir", "download_url": null},
            {"name": "README.md", "path": "README.md", "type": "file",
             "download_url": "https://raw.githubusercontent.com/acme/widgets/main/README.md"}
        ]"#;
        let entries = serde_json::from_str::<ContentListing>(json).unwrap().into_entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[0].download_ref, None);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].path, "README.md");
        assert!(entries[1].download_ref.is_some());
    }

    #[test]
    fn test_listing_single_object_becomes_vec() {
        let json = r#"{"name": "main.rs", "path": "src/main.rs", "type": "file",
                       "download_url": "https://example.com/main.rs", "content": "Zm4="}"#;
        let entries = serde_json::from_str::<ContentListing>(json).unwrap().into_entries();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "src/main.rs");
    }

    #[test]
    fn test_submodule_is_a_file_without_download() {
        let json = r#"[
            {"name": "vendor", "path": "vendor", "type": "submodule", "download_url": null}
        ]"#;
        let entries = serde_json::from_str::<ContentListing>(json).unwrap().into_entries();

        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].download_ref, None);
    }

    #[test]
    fn test_contents_url_encodes_segments() {
        let repo = RepoReference::new("acme", "widgets", "");
        let url = client().contents_url(&repo, "docs/My Notes/#1");
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widgets/contents/docs/My%20Notes/%231"
        );
    }

    #[test]
    fn test_contents_url_root_and_ref() {
        let mut repo = RepoReference::new("acme", "widgets", "docs");
        repo.git_ref = Some("v1.2".to_string());
        let url = client().contents_url(&repo, "");
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/widgets/contents?ref=v1.2"
        );

        // An empty ref (e.g. from `--ref ""`) means the default branch
        repo.git_ref = Some(String::new());
        let url = client().contents_url(&repo, "src");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_error_message_prefers_api_message() {
        let body = r#"{"message": "API rate limit exceeded"}"#;
        let msg = error_message(StatusCode::FORBIDDEN, body);
        assert_eq!(msg, "API rate limit exceeded");

        let msg = error_message(StatusCode::BAD_GATEWAY, "");
        assert_eq!(msg, "Bad Gateway");
    }
}
