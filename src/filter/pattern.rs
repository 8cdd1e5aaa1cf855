// src/filter/pattern.rs
// =============================================================================
// Include/exclude rules with shell-style globs.
//
// Order of evaluation never changes:
//   1. name matches any exclude pattern         -> Excluded
//   2. include list non-empty, name matches none -> NotIncluded
//   3. otherwise                                  -> Included
//
// Matching is case-insensitive: "*.PNG" and "*.png" are the same rule.
//
// We use `globset`, which compiles all patterns of a list into one matcher,
// so checking a name costs one pass no matter how many patterns there are.
// =============================================================================

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::DEFAULT_EXCLUDES;
use crate::error::{AggregateError, Result};

/// The uncompiled rules, as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl FilterSpec {
    /// Exactly the given patterns; the default exclusions are NOT added.
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// The given patterns plus DEFAULT_EXCLUDES.
    pub fn with_default_excludes(include: Vec<String>, exclude: Vec<String>) -> Self {
        let mut merged: Vec<String> = DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect();
        for pattern in exclude {
            if !merged.contains(&pattern) {
                merged.push(pattern);
            }
        }
        Self {
            include,
            exclude: merged,
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::with_default_excludes(Vec::new(), Vec::new())
    }
}

/// Why a file name was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Excluded,
    NotIncluded,
    Included,
}

/// FilterSpec compiled into glob matchers.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl PatternFilter {
    pub fn new(spec: &FilterSpec) -> Result<Self> {
        let include = compile(&spec.include)?;
        let exclude = compile(&spec.exclude)?;
        Ok(Self {
            include: if include.is_empty() { None } else { Some(include) },
            exclude,
        })
    }

    pub fn evaluate(&self, name: &str) -> Verdict {
        if self.exclude.is_match(name) {
            return Verdict::Excluded;
        }
        match &self.include {
            Some(include) if !include.is_match(name) => Verdict::NotIncluded,
            _ => Verdict::Included,
        }
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.evaluate(name) == Verdict::Included
    }
}

// Blank entries are skipped so "*.rs, ,*.md" from a CLI list is harmless.
fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| AggregateError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| AggregateError::InvalidPattern {
        pattern: patterns.join(","),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter =
            PatternFilter::new(&FilterSpec::new(patterns(&["*.md"]), patterns(&["README*"])))
                .unwrap();
        assert_eq!(filter.evaluate("README.md"), Verdict::Excluded);
        assert_eq!(filter.evaluate("guide.md"), Verdict::Included);
    }

    #[test]
    fn test_empty_include_keeps_everything_not_excluded() {
        let filter = PatternFilter::new(&FilterSpec::new(vec![], patterns(&["*.lock"]))).unwrap();
        assert!(filter.is_included("main.rs"));
        assert!(filter.is_included("Makefile"));
        assert_eq!(filter.evaluate("Cargo.lock"), Verdict::Excluded);
    }

    #[test]
    fn test_include_list_drops_unmatched() {
        let filter =
            PatternFilter::new(&FilterSpec::new(patterns(&["*.ps1", "*.md"]), vec![])).unwrap();
        assert!(filter.is_included("main.ps1"));
        assert_eq!(filter.evaluate("main.rs"), Verdict::NotIncluded);
    }

    #[test]
    fn test_matching_ignores_case() {
        let filter = PatternFilter::new(&FilterSpec::default()).unwrap();
        assert_eq!(filter.evaluate("LOGO.PNG"), Verdict::Excluded);
        assert_eq!(filter.evaluate("Photo.Jpeg"), Verdict::Excluded);
        assert!(filter.is_included("lib.rs"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let spec = FilterSpec::new(patterns(&["file?.txt"]), vec![]);
        let filter = PatternFilter::new(&spec).unwrap();
        assert!(filter.is_included("file1.txt"));
        assert!(!filter.is_included("file10.txt"));
    }

    #[test]
    fn test_default_excludes_can_be_bypassed() {
        let filter = PatternFilter::new(&FilterSpec::new(vec![], vec![])).unwrap();
        assert!(filter.is_included("logo.png"));
    }

    #[test]
    fn test_default_excludes_merge_without_duplicates() {
        let spec = FilterSpec::with_default_excludes(vec![], patterns(&["*.png", "*.lock"]));
        assert_eq!(spec.exclude.len(), DEFAULT_EXCLUDES.len() + 1);
        assert_eq!(spec.exclude.last().map(String::as_str), Some("*.lock"));
    }

    #[test]
    fn test_blank_patterns_are_ignored() {
        let filter =
            PatternFilter::new(&FilterSpec::new(patterns(&[" *.rs ", ""]), vec![])).unwrap();
        assert!(filter.is_included("lib.rs"));
        assert!(!filter.is_included("lib.py"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = PatternFilter::new(&FilterSpec::new(patterns(&["src/[a-"]), vec![])).unwrap_err();
        match err {
            AggregateError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "src/[a-"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
