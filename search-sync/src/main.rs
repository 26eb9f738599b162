use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use search_sync::telemetry::init_tracing;
use search_sync::{Dependencies, JsonRecordStore, SearchOptions, SearchSync};
use search_sync_shared::QueryType;

#[derive(Parser)]
#[command(name = "search-sync")]
#[command(about = "Synchronize model records with a search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Logical model name, e.g. ElasticUser
    #[arg(long, global = true, default_value = "Record")]
    model: String,

    /// Primary-key attribute
    #[arg(long, global = true, default_value = "id")]
    primary_key: String,

    /// Index name (overrides SEARCH_SYNC_INDEX)
    #[arg(long, global = true)]
    index: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every record of a JSON array file
    Import {
        /// File holding a JSON array of records
        #[arg(long)]
        file: PathBuf,

        /// Comma-separated attributes to index (default: all)
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Search one attribute
    Search {
        /// Attribute to query
        #[arg(long)]
        attribute: String,

        /// Value to look for
        #[arg(long)]
        value: String,

        /// Query clause (match, match_phrase, term, prefix, ...)
        #[arg(long, default_value = "match")]
        query_type: QueryType,

        /// Maximum number of hits
        #[arg(long)]
        size: Option<usize>,
    },
    /// Count the model's documents
    Count,
    /// Make recent writes visible to search
    Refresh,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let deps = Dependencies::new()
        .await
        .context("failed to initialize dependencies")?;

    let store = match &cli.command {
        Commands::Import { file, .. } => {
            JsonRecordStore::from_path(&cli.model, &cli.primary_key, file).await?
        }
        _ => JsonRecordStore::empty(&cli.model, &cli.primary_key),
    };

    let sync = SearchSync::new(Arc::new(store), deps.context.clone());
    if let Some(index) = &cli.index {
        sync.set_index(index.clone());
    }

    info!(
        model = %sync.model_name(),
        index = %sync.index(),
        doc_type = %sync.doc_type(),
        "Search sync ready"
    );

    match cli.command {
        Commands::Import { keys, .. } => {
            if !keys.is_empty() {
                sync.set_values(Some(keys));
            }
            let summary = sync.import().await?;
            sync.refresh().await?;
            println!(
                "imported {} of {} records ({} failed, {} skipped)",
                summary.succeeded, summary.total, summary.failed, summary.skipped
            );
        }
        Commands::Search {
            attribute,
            value,
            query_type,
            size,
        } => {
            let options = SearchOptions {
                query_type: Some(query_type),
                size,
            };
            let records = sync.search(&attribute, value, options).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Count => {
            println!("{}", sync.count().await?);
        }
        Commands::Refresh => {
            sync.refresh().await?;
            println!("refreshed {}", sync.index());
        }
    }

    Ok(())
}
