// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env (so GITHUB_TOKEN can live there) and set up logging
// 2. Parse command-line arguments using clap
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = success, 2 = error)
//
// The document goes to stdout (or a file); everything else, logs and the
// summary, goes to stderr so `repo-bundle bundle x/y > out.xml` just works.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, TargetArgs};
use repo_bundle::{
    aggregate, list_files, AggregateRequest, DocumentOutput, GitHubClient, RepoReference,
    TracingObserver,
};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole cause chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "repo_bundle=debug"
    } else {
        "repo_bundle=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Bundle { target, output } => handle_bundle(&target, output).await,
        Commands::List { target } => handle_list(&target).await,
    }
}

fn connect(target: &TargetArgs) -> Result<(GitHubClient, RepoReference)> {
    let reference = target.reference()?;
    let client = GitHubClient::new(target.client_config())
        .context("failed to set up the GitHub client")?;
    Ok((client, reference))
}

// Handles the 'bundle' subcommand
async fn handle_bundle(target: &TargetArgs, output: Option<std::path::PathBuf>) -> Result<i32> {
    let (client, reference) = connect(target)?;
    eprintln!("🔍 Bundling {}", reference);

    let request = AggregateRequest::new(reference)
        .with_filter(target.filter_spec())
        .with_destination(output);

    let report = aggregate(&client, &request, Some(&TracingObserver))
        .await
        .with_context(|| format!("failed to bundle {}", request.reference))?;

    match &report.output {
        DocumentOutput::Text(document) => print!("{}", document),
        DocumentOutput::Written(path) => eprintln!("💾 Wrote {}", path.display()),
    }

    eprintln!("📊 Summary for {}:", report.repository);
    eprintln!("   📄 Matched: {}", report.discovered);
    eprintln!("   ✅ Bundled: {}", report.emitted);
    if !report.warnings.is_empty() {
        eprintln!("   ⚠️  Skipped: {}", report.warnings.len());
    }

    Ok(0)
}

// Handles the 'list' subcommand
async fn handle_list(target: &TargetArgs) -> Result<i32> {
    let (client, reference) = connect(target)?;

    let files = list_files(&client, &reference, &target.filter_spec(), Some(&TracingObserver))
        .await
        .with_context(|| format!("failed to list {}", reference))?;

    if files.is_empty() {
        eprintln!("⚠️  No files matched in {}", reference);
    }
    for file in &files {
        println!("{}", file.path);
    }
    eprintln!("📄 {} file(s)", files.len());

    Ok(0)
}
