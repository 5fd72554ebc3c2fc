//! Command-line front end for the blogdex article index.
//!
//! # Responsibility
//! - Load a content tree once and answer one listing/detail/search request.
//! - Print results as JSON (or raw markdown for `.md` detail paths).

use anyhow::Context;
use blogdex_core::api::search::parse_limit;
use blogdex_core::{
    default_log_level, init_logging, list, render_detail, search, ArticleService, ContentConfig,
    ContentStore, DetailView, Ingestor, ListingParams, SearchParams,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogdex", version, about = "Query a directory of markdown/HTML articles")]
struct Cli {
    /// Directory scanned for article files
    #[arg(long, default_value = blogdex_core::config::DEFAULT_CONTENT_ROOT)]
    content_root: PathBuf,
    /// Metadata manifest (JSON array or {"files": [...]}); skipped when absent
    #[arg(long, default_value = blogdex_core::config::DEFAULT_MANIFEST_PATH)]
    manifest: PathBuf,
    /// Write rolling logs into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
    /// Related articles per detail view
    #[arg(long, default_value_t = blogdex_core::config::DEFAULT_RELATED_LIMIT)]
    related: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run ingestion and print the pass counters
    Scan,
    /// List published articles, newest first
    List {
        /// Keyword matched against title and description
        #[arg(long, default_value = "")]
        q: String,
        /// Tag substring
        #[arg(long, default_value = "")]
        tag: String,
    },
    /// Show one article: `slug`, `slug.md` or `slug.json`
    Show { segment: String },
    /// Keyword search with a result cap
    Search {
        #[arg(long, default_value = "")]
        q: String,
        /// Max results; invalid values fall back to the default
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to start logging")?;
    }

    let config = ContentConfig::new(&cli.content_root)
        .with_manifest(&cli.manifest)
        .with_related_limit(cli.related);
    config.validate().context("invalid content configuration")?;

    if let Commands::Scan = cli.command {
        let (collection, report) = Ingestor::new(config).ingest();
        info!(
            "event=cli_scan module=cli status=ok articles={}",
            collection.len()
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let search_limit = config.search_limit;
    let related_limit = config.related_limit;
    let service = ArticleService::new(ContentStore::new(config)).with_related_limit(related_limit);

    match cli.command {
        Commands::Scan => {}
        Commands::List { q, tag } => {
            let page = list(&service, &ListingParams { query: q, tag });
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Commands::Show { segment } => match render_detail(&service, &segment)? {
            DetailView::Html(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
            DetailView::Markdown(markdown) => print!("{markdown}"),
            DetailView::Json(projection) => println!("{}", serde_json::to_string(&projection)?),
        },
        Commands::Search { q, limit } => {
            let params = SearchParams::new(q, parse_limit(limit.as_deref(), search_limit));
            println!("{}", search(&service, &params).to_json()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn manifest_defaults_to_content_metadata_file() {
        let cli = Cli::parse_from(["blogdex", "scan"]);
        assert_eq!(
            cli.manifest,
            std::path::PathBuf::from(blogdex_core::config::DEFAULT_MANIFEST_PATH)
        );

        let cli = Cli::parse_from(["blogdex", "--manifest", "other.json", "scan"]);
        assert_eq!(cli.manifest, std::path::PathBuf::from("other.json"));
    }

    #[test]
    fn search_accepts_malformed_limit_text() {
        let cli = Cli::parse_from(["blogdex", "search", "--q", "go", "--limit", "-3"]);
        match cli.command {
            Commands::Search { q, limit } => {
                assert_eq!(q, "go");
                assert_eq!(limit.as_deref(), Some("-3"));
            }
            _ => panic!("expected search command"),
        }
    }
}
