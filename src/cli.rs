// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands share the same repository/filter/connection flags:
//   repo-bundle bundle acme/widgets -i "*.rs,*.md" -o bundle.xml
//   repo-bundle list   acme/widgets/src
//
// Rust concepts:
// - Derive macros: clap generates the parser from these structs
// - #[command(flatten)]: reuse one group of args in several subcommands
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use url::Url;

use repo_bundle::config::DEFAULT_API_BASE;
use repo_bundle::{ClientConfig, FilterSpec, RepoReference};

#[derive(Parser, Debug)]
#[command(
    name = "repo-bundle",
    version,
    about = "Bundle the files of a GitHub repository into one XML document",
    long_about = "repo-bundle walks a GitHub repository (or a folder inside it), keeps the files \
                  that match your include/exclude globs, and writes them into a single XML \
                  document ready to paste into an LLM prompt."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the matching files and assemble the document
    ///
    /// Example: repo-bundle bundle acme/widgets -i "*.ps1,*.md"
    Bundle {
        #[command(flatten)]
        target: TargetArgs,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Only list the files that would be bundled
    ///
    /// Example: repo-bundle list acme/widgets/examples
    List {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Repository as owner/name[/subfolder] or a github.com URL
    pub repository: String,

    /// Only keep files whose name matches one of these globs (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Drop files whose name matches one of these globs (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Don't add the built-in binary/media exclusions
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Branch, tag or commit to read (default branch if omitted)
    #[arg(long = "ref")]
    pub git_ref: Option<String>,

    /// GitHub token; without one only public repos are reachable
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// REST API base URL (for GitHub Enterprise)
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_url: Url,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

impl TargetArgs {
    pub fn filter_spec(&self) -> FilterSpec {
        if self.no_default_excludes {
            FilterSpec::new(self.include.clone(), self.exclude.clone())
        } else {
            FilterSpec::with_default_excludes(self.include.clone(), self.exclude.clone())
        }
    }

    // A ref given on the command line beats one taken from a /tree/ URL.
    // An empty --ref means the default branch.
    pub fn reference(&self) -> repo_bundle::Result<RepoReference> {
        let mut reference = RepoReference::parse(&self.repository)?;
        if let Some(git_ref) = &self.git_ref {
            reference.git_ref = Some(git_ref.clone()).filter(|r| !r.is_empty());
        }
        Ok(reference)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_api_base(self.api_url.clone())
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. value_delimiter = ','
//    - `-i "*.rs,*.md"` and `-i "*.rs" -i "*.md"` both give vec!["*.rs", "*.md"]
//
// 2. env = "GITHUB_TOKEN"
//    - If --token isn't given, clap reads the environment variable instead
//    - hide_env_values keeps the token out of --help output
// -----------------------------------------------------------------------------
