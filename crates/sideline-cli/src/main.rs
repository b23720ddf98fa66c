mod store;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use sideline_core::{merge, Record};
use sideline_feed::{extract_content, normalize_article, normalize_game, FeedClient};

const USER_AGENT: &str = concat!("sideline-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Parser)]
#[command(name = "sideline-cli")]
#[command(about = "Fetches team feeds and maintains the normalized record cache")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the feed, merge against the cache, and persist the result.
    Refresh(RefreshArgs),
    /// Print the cached record set.
    Show {
        #[arg(long, env = "SIDELINE_CACHE_PATH", default_value = "records.json")]
        cache: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RefreshArgs {
    /// RSS feed to fetch.
    #[arg(long, env = "SIDELINE_FEED_URL")]
    feed_url: String,

    /// Remote denylist JSON; skipped when absent.
    #[arg(long, env = "SIDELINE_DENYLIST_URL")]
    denylist_url: Option<String>,

    /// Record cache file read before and written after the merge.
    #[arg(long, env = "SIDELINE_CACHE_PATH", default_value = "records.json")]
    cache: PathBuf,

    /// Treat the feed as a schedule feed (opponent/score items).
    #[arg(long)]
    games: bool,

    /// Fetch article pages for records whose body is still empty after merge.
    #[arg(long)]
    fetch_content: bool,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[arg(long, default_value_t = 2)]
    max_retries: u32,

    #[arg(long, default_value_t = 1)]
    backoff_base_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Refresh(args) => refresh(args).await,
        Commands::Show { cache } => show(&cache),
    }
}

async fn refresh(args: RefreshArgs) -> anyhow::Result<()> {
    let client = FeedClient::new(
        args.timeout_secs,
        USER_AGENT,
        args.max_retries,
        args.backoff_base_secs,
    )?;

    let items = client.fetch_feed(&args.feed_url).await;
    let incoming: Vec<Record> = if args.games {
        items.iter().filter_map(normalize_game).collect()
    } else {
        items.iter().filter_map(normalize_article).collect()
    };
    info!(
        fetched = items.len(),
        normalized = incoming.len(),
        "feed normalized"
    );

    let deny_list = match &args.denylist_url {
        Some(url) => client.fetch_deny_list(url).await,
        None => Vec::new(),
    };

    let existing = store::load_records(&args.cache)?;
    let mut merged = merge(&existing, &incoming, &deny_list);

    if args.fetch_content {
        fill_missing_content(&client, &mut merged).await;
    }

    store::save_records(&args.cache, &merged)?;
    println!("{} records in {}", merged.len(), args.cache.display());
    Ok(())
}

/// Fetches and extracts article bodies for records that came out of the
/// merge without one. Extraction misses leave the body empty; the UI layer
/// substitutes its placeholder.
async fn fill_missing_content(client: &FeedClient, records: &mut [Record]) {
    for record in records.iter_mut() {
        if record.has_content() || record.content_url.is_empty() {
            continue;
        }
        match client.try_fetch_page(&record.content_url).await {
            Ok(html) => {
                let body = extract_content(&html);
                if body.is_empty() {
                    info!(url = %record.content_url, "no extractable body on article page");
                } else {
                    record.content = Some(body);
                }
            }
            Err(err) => {
                info!(url = %record.content_url, error = %err, "content fetch failed, leaving body empty");
            }
        }
    }
}

fn show(cache: &Path) -> anyhow::Result<()> {
    let records = store::load_records(cache)?;
    for record in &records {
        let body = if record.has_content() { "cached" } else { "empty" };
        println!("{}  {}  [{body}]  {}", record.date, record.title, record.content_url);
    }
    println!("{} records", records.len());
    Ok(())
}
