use anyhow::Context;
use clap::Parser;
use ns_core::{SourceFilter, Status};
use ns_source::{NewsApiClient, NewsSource, DEFAULT_BASE_URL, DEFAULT_HEADLINE_COUNTRY};
use ns_web::{create_app, AppState};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

mod config;
mod logging;

use config::DEFAULT_KEY_FILE;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search NewsAPI from a browser or the terminal", long_about = None)]
struct Cli {
    /// File holding the NewsAPI key
    #[arg(long, env = "NEWS_API_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    key_file: PathBuf,
    /// NewsAPI key; takes precedence over --key-file
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Country whose top headlines are served
    #[arg(long, default_value = DEFAULT_HEADLINE_COUNTRY)]
    headline_country: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the search page and its JSON endpoints
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
        /// Language of the sources offered on the search page
        #[arg(long, default_value = "en")]
        default_language: String,
        /// Country of the sources offered on the search page
        #[arg(long, default_value = "us")]
        default_country: String,
    },
    /// Print the first COUNT top headlines
    Headlines { count: usize },
    /// Print articles matching comma separated keywords
    Keywords { keywords: String },
    /// Print articles whose title matches
    Title { title: String },
    /// Print articles from a source id (e.g. bbc-news)
    Source { id: String },
    /// Print the available sources
    Sources {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T, status: Status) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    if status == Status::Bad {
        anyhow::bail!("NewsAPI request failed");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C signal");
}

async fn serve(news: Arc<NewsSource>, host: &str, port: u16, defaults: SourceFilter) -> anyhow::Result<()> {
    let state = AppState::new(news, defaults);
    state.warm_sources().await;
    let app = create_app(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", bind_addr))?;

    info!("🚀 News search listening on http://{}/search", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let api_key = config::resolve_api_key(cli.api_key.as_deref(), &cli.key_file)
        .context("Failed to load the NewsAPI key")?;
    let client = NewsApiClient::new(&cli.base_url).context("Failed to create the NewsAPI client")?;
    let news = Arc::new(
        NewsSource::new(Arc::new(client), api_key).with_headline_country(cli.headline_country),
    );

    match cli.command {
        Commands::Serve {
            host,
            port,
            default_language,
            default_country,
        } => {
            let defaults = SourceFilter::new(None, Some(default_language.as_str()), Some(default_country.as_str()));
            serve(news, &host, port, defaults).await
        }
        Commands::Headlines { count } => {
            let result = news.top_headlines(count, false).await;
            print_json(&result, result.status)
        }
        Commands::Keywords { keywords } => {
            let result = news.search_by_keywords(&keywords).await;
            print_json(&result, result.status)
        }
        Commands::Title { title } => {
            let result = news.search_by_title(&title).await;
            print_json(&result, result.status)
        }
        Commands::Source { id } => {
            let result = news.articles_from_source(&id).await;
            print_json(&result, result.status)
        }
        Commands::Sources {
            category,
            language,
            country,
        } => {
            let filter = SourceFilter::new(category.as_deref(), language.as_deref(), country.as_deref());
            let result = news.sources(&filter, false).await;
            print_json(&result, result.status)
        }
    }
}
