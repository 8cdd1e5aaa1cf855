// src/github/memory.rs
// =============================================================================
// An in-memory RemoteSource for tests.
//
// It behaves like GitHub where it matters to the crawler:
// - repository lookup ignores case and answers with the canonical casing
// - path lookup is case-sensitive
// - listings come back in insertion order
// - listing a file path returns just that file
//
// Failures can be injected per path (listing or fetch), and files can be
// added without a download reference.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{EntryKind, RemoteSource, RepoMetadata, RepoReference, SourceError, TreeEntry};

#[derive(Debug)]
pub struct InMemorySource {
    owner: String,
    name: String,
    // directory path ("" = root) -> children in insertion order
    dirs: HashMap<String, Vec<TreeEntry>>,
    // download ref -> content
    contents: HashMap<String, String>,
    failing_fetches: HashSet<String>,
    failing_listings: HashSet<String>,
    repository_error: Option<u16>,
    listed: Mutex<Vec<String>>,
    listed_refs: Mutex<Vec<Option<String>>>,
}

impl InMemorySource {
    pub fn new(owner: &str, name: &str) -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(String::new(), Vec::new());
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            dirs,
            contents: HashMap::new(),
            failing_fetches: HashSet::new(),
            failing_listings: HashSet::new(),
            repository_error: None,
            listed: Mutex::new(Vec::new()),
            listed_refs: Mutex::new(Vec::new()),
        }
    }

    /// Adds a file, creating any missing parent directories.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let download_ref = self.download_ref(path);
        self.contents.insert(download_ref.clone(), content.to_string());
        self.add_entry(path, EntryKind::File, Some(download_ref));
        self
    }

    /// Adds a file the host cannot serve (like a submodule on GitHub).
    pub fn with_undownloadable_file(mut self, path: &str) -> Self {
        self.add_entry(path, EntryKind::File, None);
        self
    }

    /// Adds an empty directory.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.ensure_dir(path.trim_matches('/'));
        self
    }

    /// Adds a file whose content fetch fails with HTTP 500.
    pub fn with_failing_fetch(mut self, path: &str) -> Self {
        let download_ref = self.download_ref(path);
        self.failing_fetches.insert(download_ref.clone());
        self.add_entry(path, EntryKind::File, Some(download_ref));
        self
    }

    /// Makes listing `path` fail with HTTP 500.
    pub fn with_failing_listing(mut self, path: &str) -> Self {
        self.failing_listings.insert(path.trim_matches('/').to_string());
        self
    }

    /// Makes the repository lookup fail with the given HTTP status.
    pub fn with_repository_error(mut self, status: u16) -> Self {
        self.repository_error = Some(status);
        self
    }

    /// Every path passed to `list_directory`, in call order.
    pub fn listed_paths(&self) -> Vec<String> {
        self.listed.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// The git ref that came with each `list_directory` call, in call order.
    /// Content is the same for every ref.
    pub fn listed_refs(&self) -> Vec<Option<String>> {
        self.listed_refs.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn download_ref(&self, path: &str) -> String {
        format!("memory://{}/{}/{}", self.owner, self.name, path.trim_matches('/'))
    }

    fn add_entry(&mut self, path: &str, kind: EntryKind, download_ref: Option<String>) {
        let path = path.trim_matches('/');
        let (parent, name) = split_parent(path);
        self.ensure_dir(parent);
        if let Some(children) = self.dirs.get_mut(parent) {
            children.push(TreeEntry {
                name: name.to_string(),
                path: path.to_string(),
                kind,
                download_ref,
            });
        }
    }

    fn ensure_dir(&mut self, path: &str) {
        if self.dirs.contains_key(path) {
            return;
        }
        let (parent, name) = split_parent(path);
        self.ensure_dir(parent);
        if let Some(children) = self.dirs.get_mut(parent) {
            children.push(TreeEntry {
                name: name.to_string(),
                path: path.to_string(),
                kind: EntryKind::Directory,
                download_ref: None,
            });
        }
        self.dirs.insert(path.to_string(), Vec::new());
    }

    fn find_file(&self, path: &str) -> Option<TreeEntry> {
        let (parent, _) = split_parent(path);
        self.dirs
            .get(parent)?
            .iter()
            .find(|e| e.kind == EntryKind::File && e.path == path)
            .cloned()
    }
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

#[async_trait]
impl RemoteSource for InMemorySource {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RepoMetadata, SourceError> {
        if let Some(status) = self.repository_error {
            return Err(SourceError::Status {
                status,
                message: "simulated repository failure".to_string(),
            });
        }
        if owner.eq_ignore_ascii_case(&self.owner) && name.eq_ignore_ascii_case(&self.name) {
            Ok(RepoMetadata {
                owner: self.owner.clone(),
                name: self.name.clone(),
            })
        } else {
            Err(SourceError::NotFound {
                resource: format!("repository {}/{}", owner, name),
            })
        }
    }

    async fn list_directory(
        &self,
        repo: &RepoReference,
        path: &str,
    ) -> Result<Vec<TreeEntry>, SourceError> {
        let path = path.trim_matches('/');
        if let Ok(mut listed) = self.listed.lock() {
            listed.push(path.to_string());
        }
        if let Ok(mut refs) = self.listed_refs.lock() {
            refs.push(repo.git_ref.clone());
        }

        if repo.owner != self.owner || repo.name != self.name {
            return Err(SourceError::NotFound {
                resource: format!("repository {}", repo.slug()),
            });
        }
        if self.failing_listings.contains(path) {
            return Err(SourceError::Status {
                status: 500,
                message: "simulated listing failure".to_string(),
            });
        }
        if let Some(children) = self.dirs.get(path) {
            return Ok(children.clone());
        }
        self.find_file(path)
            .map(|entry| vec![entry])
            .ok_or_else(|| SourceError::NotFound {
                resource: format!("path '{}'", path),
            })
    }

    async fn fetch_content(&self, download_ref: &str) -> Result<String, SourceError> {
        if self.failing_fetches.contains(download_ref) {
            return Err(SourceError::Status {
                status: 500,
                message: "simulated fetch failure".to_string(),
            });
        }
        self.contents
            .get(download_ref)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                resource: download_ref.to_string(),
            })
    }
}
