use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use shelf_catalog::CatalogQuery;
use shelf_feed::{
    export_csv, Completion, FeedParams, FeedSession, HttpTransport, LocalTransport,
    PageTransport, ScrollViewport,
};
use shelf_kernel::settings::Settings;

/// Simulated table geometry for `browse`
const ROW_HEIGHT: f64 = 48.0;
const VIEWPORT_HEIGHT: f64 = 900.0;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Seeded book catalog service and feed client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP catalog service
    Serve,
    /// Print one generated page as JSON
    Generate {
        #[command(flatten)]
        feed: FeedArgs,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Scroll through the feed page by page, optionally exporting the result
    Browse {
        #[command(flatten)]
        feed: FeedArgs,
        /// Base URL of a running catalog service
        #[arg(long, env = "SHELF_URL", default_value = "http://localhost:5000")]
        url: String,
        /// Generate pages in-process instead of calling a server
        #[arg(long)]
        offline: bool,
        /// Number of pages to load
        #[arg(long, default_value_t = 3)]
        pages: u32,
        /// Directory to write books.csv into
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct FeedArgs {
    #[arg(long, default_value = "42")]
    seed: String,
    #[arg(long, default_value = "en")]
    language: String,
    /// Average likes per book
    #[arg(long, default_value_t = 3.5)]
    likes: f64,
    /// Average reviews per book
    #[arg(long, default_value_t = 2.7)]
    reviews: f64,
}

impl From<FeedArgs> for FeedParams {
    fn from(args: FeedArgs) -> Self {
        FeedParams::new(args.seed, args.language, args.likes, args.reviews)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load SHELF settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => shelf_app::run(settings).await,
        Command::Generate { feed, page } => generate(feed.into(), page),
        Command::Browse {
            feed,
            url,
            offline,
            pages,
            export,
        } => {
            let transport: Arc<dyn PageTransport> = if offline {
                Arc::new(LocalTransport::new())
            } else {
                Arc::new(HttpTransport::new(url)?)
            };
            browse(feed.into(), transport, pages, export).await
        }
    }
}

fn generate(params: FeedParams, page: u32) -> anyhow::Result<()> {
    let query: CatalogQuery = params.query(page);
    let books = shelf_catalog::generate(&query);
    let json = serde_json::to_string_pretty(&books).context("failed to encode page")?;
    println!("{json}");
    Ok(())
}

async fn browse(
    params: FeedParams,
    transport: Arc<dyn PageTransport>,
    pages: u32,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let session = FeedSession::new(params, transport);
    let mut loaded = 0;
    let mut retries = 0;

    while loaded < pages {
        let content_height = session.books().await.len() as f64 * ROW_HEIGHT;
        let scrolled_to_bottom = ScrollViewport::new(
            VIEWPORT_HEIGHT,
            (content_height - VIEWPORT_HEIGHT).max(0.0),
            content_height,
        );

        match session.on_scroll_near_bottom(scrolled_to_bottom).await {
            Some(Completion::Appended(count)) => {
                loaded += 1;
                retries = 0;
                tracing::info!(page = loaded, count, "page loaded");
            }
            Some(Completion::Failed) => {
                retries += 1;
                if retries > MAX_RETRIES {
                    bail!("giving up after {MAX_RETRIES} failed attempts");
                }
                tokio::time::sleep(RETRY_DELAY * retries).await;
            }
            Some(Completion::Stale) => {}
            Some(Completion::Exhausted) | None => {
                tracing::info!("no more books available");
                break;
            }
        }
    }

    let books = session.books().await;
    for book in &books {
        println!(
            "{:>5}  {}  {}  |  {}  |  {}  |  {} likes, {} reviews",
            book.index, book.isbn, book.title, book.author, book.publisher, book.likes, book.reviews
        );
    }

    if let Some(dir) = export {
        let path = export_csv(&books, &dir)
            .with_context(|| format!("failed to export books to {}", dir.display()))?;
        println!("exported {} books to {}", books.len(), path.display());
    }

    Ok(())
}
