// src/filter/mod.rs
// =============================================================================
// This module decides which files make it into the bundle.
//
// Submodules:
// - pattern: FilterSpec (the rules), PatternFilter (the compiled rules)
// - defaults: the built-in list of binary/media globs we skip
//
// Rules are matched against the file NAME only ("logo.png"), never the full
// path, so "*.png" excludes PNGs in every folder.
// =============================================================================

mod defaults;
mod pattern;

pub use defaults::DEFAULT_EXCLUDES;
pub use pattern::{FilterSpec, PatternFilter, Verdict};
