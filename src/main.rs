use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use pdfsearch::config;
use state::AppState;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIME"), ")");

/// Index page-marked text extracted from PDFs and search it per file
#[derive(Debug, Parser)]
#[command(name = "pdfsearch", version, long_version = LONG_VERSION, about)]
struct Cli {
    /// Config file (created with defaults if missing) / 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Index (or re-index) text files
    Index {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Search one indexed file
    Search { file: String, query: String },
    /// List indexed files
    Files,
    /// Remove a file from the index
    Remove { file: String },
    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfsearch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let app_config = config::load_config(&config_path)?;

    let searcher = state::open_searcher(&app_config).await?;

    match cli.command {
        Command::Index { files } => {
            for file in &files {
                let pages = searcher
                    .index_txt_file(file)
                    .await
                    .with_context(|| format!("Failed to index {}", file))?;
                println!("{}: {} pages", file, pages);
            }
        }
        Command::Search { file, query } => {
            let results = searcher.search(&query, &file).await?;
            for r in &results {
                println!("{} pp {}: {}", r.file, r.page, r.original_content.trim_end());
            }
            println!("{} results", results.len());
        }
        Command::Files => {
            for f in searcher.file_summaries().await? {
                println!("{}\t{} pages", f.file, f.page_count);
            }
        }
        Command::Remove { file } => {
            let removed = searcher.remove_file(&file).await?;
            println!("{}: removed {} pages", file, removed);
        }
        Command::Serve => {
            if app_config.index.source_root.is_none() {
                anyhow::bail!("index.source_root must be set in {:?} to serve the HTTP API", config_path);
            }
            let state = Arc::new(AppState::new(searcher));
            let app = api::router(state.clone(), &app_config.server.allowed_origins);

            let bind_addr = app_config.server.bind_address();
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

            tracing::info!("Server running at http://{}", bind_addr);

            axum::serve(listener, app).await?;

            state.searcher.store().close().await;
            return Ok(());
        }
    }

    searcher.store().close().await;
    Ok(())
}
