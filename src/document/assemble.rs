// src/document/assemble.rs
// =============================================================================
// Collects (path, content) pairs and renders them as one XML document.
//
// Indexing:
//   Entries are numbered 1, 2, 3, ... in the order they are appended. Files
//   that were skipped upstream never reach the assembler, so they don't use
//   up a number and the sequence has no gaps.
//
// Output:
//   The whole document is rendered in memory first. Only then is it either
//   returned or written to the destination file, so a failed run never
//   leaves a half-written file behind.
// =============================================================================

use std::fmt::Write;
use std::path::{Path, PathBuf};

use super::escape_xml;
use crate::error::{AggregateError, Result};

/// One file in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// 1-based position in the document
    pub index: usize,
    pub source_path: String,
    pub content: String,
}

/// What `finish` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutput {
    /// The rendered document
    Text(String),
    /// The document was written to this file
    Written(PathBuf),
}

#[derive(Debug, Default)]
pub struct DocumentAssembler {
    entries: Vec<DocumentEntry>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns the index it was given.
    pub fn append(&mut self, source_path: &str, content: String) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(DocumentEntry {
            index,
            source_path: source_path.to_string(),
            content,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn render(&self) -> String {
        let body: usize = self
            .entries
            .iter()
            .map(|e| e.source_path.len() + e.content.len() + 96)
            .sum();
        let mut out = String::with_capacity(body + 32);

        out.push_str("<documents>\n");
        for entry in &self.entries {
            // Writing to a String can't fail
            let _ = writeln!(out, "<document index=\"{}\">", entry.index);
            out.push_str("<source>");
            out.push_str(&escape_xml(&entry.source_path));
            out.push_str("</source>\n");
            out.push_str("<document_content>");
            out.push_str(&escape_xml(&entry.content));
            out.push_str("</document_content>\n");
            out.push_str("</document>\n");
        }
        out.push_str("</documents>\n");
        out
    }

    /// Renders the document and returns it, or writes it to `destination`
    /// (creating parent folders) and returns the path.
    pub async fn finish(self, destination: Option<&Path>) -> Result<DocumentOutput> {
        let document = self.render();

        let Some(path) = destination else {
            return Ok(DocumentOutput::Text(document));
        };

        let write_error = |source| AggregateError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        tokio::fs::write(path, document).await.map_err(write_error)?;

        tracing::info!(path = %path.display(), entries = self.entries.len(), "document written");
        Ok(DocumentOutput::Written(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_well_formed() {
        assert_eq!(DocumentAssembler::new().render(), "<documents>\n</documents>\n");
    }

    #[test]
    fn test_indices_follow_append_order() {
        let mut assembler = DocumentAssembler::new();
        assert!(assembler.is_empty());
        assert_eq!(assembler.append("src/main.ps1", "a".to_string()), 1);
        assert_eq!(assembler.append("readme.md", "b".to_string()), 2);

        let indices: Vec<_> = assembler.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2]);
        assert_eq!(assembler.len(), 2);
        assert!(!assembler.is_empty());
    }

    #[test]
    fn test_render_layout_and_escaping() {
        let mut assembler = DocumentAssembler::new();
        assembler.append("docs/a&b.md", "x < y".to_string());

        assert_eq!(
            assembler.render(),
            "<documents>\n\
             <document index=\"1\">\n\
             <source>docs/a&amp;b.md</source>\n\
             <document_content>x &lt; y</document_content>\n\
             </document>\n\
             </documents>\n"
        );
    }

    #[tokio::test]
    async fn test_finish_without_destination_returns_text() {
        let mut assembler = DocumentAssembler::new();
        assembler.append("a.txt", "hello".to_string());

        match assembler.finish(None).await.unwrap() {
            DocumentOutput::Text(text) => assert!(text.contains("hello")),
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_finish_writes_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("bundle.xml");

        let mut assembler = DocumentAssembler::new();
        assembler.append("a.txt", "héllo".to_string());
        let expected = assembler.render();

        let output = assembler.finish(Some(&path)).await.unwrap();
        assert_eq!(output, DocumentOutput::Written(path.clone()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }
}
