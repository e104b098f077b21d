//! Operator CLI for the redirect engine.
//!
//! Works on the same data files as the server, without starting it.
//!
//! # Usage
//!
//! ```bash
//! # Old paths for a canonical path
//! cargo run --bin redirects -- old-paths /en/enterprise-server@3.11/admin --version enterprise-server@3.11
//!
//! # Rewrite one authored link
//! cargo run --bin redirects -- rewrite /admin/foo --language en --version enterprise-server@3.11
//!
//! # Build the redirect table and print a sample
//! cargo run --bin redirects -- table --limit 20
//!
//! # Validate configuration and data files
//! cargo run --bin redirects -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `VERSIONS_FILE`, `PAGES_FILE`, and optionally
//! `EXTERNAL_REDIRECTS_FILE`, `LANGUAGES`, `FEATURE_REMOVE_FPT`.

use docs_redirects::config::{self, Config};
use docs_redirects::domain::link_rewriter::LinkRewriteContext;
use docs_redirects::server::build_state;
use docs_redirects::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for inspecting redirects and link rewriting.
#[derive(Parser)]
#[command(name = "redirects")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the old paths that redirect to a canonical path
    OldPaths {
        /// Canonical path, language prefix included
        path: String,

        #[arg(short, long, default_value = "en")]
        language: String,

        #[arg(short, long)]
        version: String,
    },

    /// Rewrite one authored local link
    Rewrite {
        href: String,

        #[arg(short, long)]
        language: String,

        #[arg(short, long)]
        version: String,

        /// Treat the link as carrying the dotcom-only class
        #[arg(long)]
        dotcom_only: bool,
    },

    /// Build the redirect table and show a sample
    Table {
        /// Number of entries to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Validate configuration and data files
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::OldPaths {
            path,
            language,
            version,
        } => {
            let state = build_state(&config).await?;
            old_paths(&state, &path, &language, &version);
        }
        Commands::Rewrite {
            href,
            language,
            version,
            dotcom_only,
        } => {
            let state = build_state(&config).await?;
            rewrite(&state, &href, &language, &version, dotcom_only)?;
        }
        Commands::Table { limit } => {
            let state = build_state(&config).await?;
            table(&state, limit);
        }
        Commands::Check => check(&config).await?,
    }

    Ok(())
}

fn old_paths(state: &AppState, path: &str, language: &str, version: &str) {
    println!("{}", "Old paths".bright_blue().bold());
    println!("  Target: {}", path.cyan());
    println!();

    let mut paths: Vec<String> = state
        .deriver()
        .derive_old_paths(path, language, version)
        .into_iter()
        .collect();
    paths.sort_unstable();

    for old_path in &paths {
        println!("  {}", old_path);
    }

    println!();
    println!("  Total: {}", paths.len().to_string().bright_white().bold());
}

fn rewrite(
    state: &AppState,
    href: &str,
    language: &str,
    version: &str,
    dotcom_only: bool,
) -> Result<()> {
    let context = LinkRewriteContext::new(language, version)?.with_dotcom_only(dotcom_only);
    let rewritten = state.link_rewriter.rewrite_link(href, &context);

    if rewritten == href {
        println!("  {} {}", href.cyan(), "(unchanged)".bright_black());
    } else {
        println!("  {} {} {}", href.cyan(), "->".bright_black(), rewritten.green());
    }

    Ok(())
}

fn table(state: &AppState, limit: usize) {
    let service = &state.redirect_service;

    println!("{}", "Redirect table".bright_blue().bold());
    println!();
    println!(
        "  Permalinks: {}",
        service.page_count().to_string().bright_white().bold()
    );
    println!(
        "  Old paths:  {}",
        service.redirect_count().to_string().bright_white().bold()
    );
    println!();

    let entries = service.sorted_redirects();
    if entries.is_empty() {
        println!("{}", "  No redirects".yellow());
        return;
    }

    println!("  {}", "─".repeat(75).bright_black());
    for (from, to) in entries.iter().take(limit) {
        println!("  {} {} {}", from, "->".bright_black(), to.cyan());
    }

    if entries.len() > limit {
        println!(
            "  {}",
            format!("... {} more", entries.len() - limit).bright_black()
        );
    }
}

async fn check(config: &Config) -> Result<()> {
    println!("{}", "Configuration check".bright_blue().bold());
    println!();

    match build_state(config).await {
        Ok(state) => {
            let registry = state.deriver().grammar().registry();
            println!("  {} Versions file: {}", "OK".green(), config.versions_file.display());
            println!(
                "      latest {}, {} supported, {} deprecated",
                registry.latest(),
                registry.supported_versions().len(),
                registry.deprecated_count()
            );
            println!("  {} Pages file: {}", "OK".green(), config.pages_file.display());
            println!(
                "      {} permalinks, {} old paths",
                state.redirect_service.page_count(),
                state.redirect_service.redirect_count()
            );
            println!();
            println!("{}", "All data files are valid".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("  {} {:#}", "FAILED".red().bold(), e);
            Err(e)
        }
    }
}
