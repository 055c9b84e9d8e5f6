mod card_cache;
mod cards;
mod catalog;
mod content_fetcher;
mod error;
mod netrunnerdb_client;
mod scheduler;
mod set_walker;
#[cfg(test)]
mod test;
mod utilities;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use card_cache::CardCache;
use cards::set_range::select_sets;
use content_fetcher::{ContentFetcher, HttpFetcher};
use netrunnerdb_client::NetrunnerDbClient;
use scheduler::Scheduler;
use set_walker::SetWalker;
use utilities::config::{Cli, Config};

/// Flips `shutdown` on Ctrl-C so walkers stop after their current card.
fn watch_for_shutdown(shutdown: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, finishing the current cards before stopping");
            shutdown.store(true, Ordering::Relaxed);
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::new(&cli);
    info!(
        "Starting, caching '{}' sets in {}",
        config.set,
        config.cards_path.display()
    );

    let scheduler = Scheduler::new(select_sets(&config.set)?)?;
    let fetcher: Arc<dyn ContentFetcher> =
        Arc::new(HttpFetcher::with_timeout(config.request_timeout)?);
    let shutdown = Arc::new(AtomicBool::new(false));
    watch_for_shutdown(Arc::clone(&shutdown));

    let walker = Arc::new(SetWalker::new(
        NetrunnerDbClient::new(Arc::clone(&fetcher), config.api_base()),
        CardCache::new(config.cards_path.clone(), fetcher, config.api_base()),
        config.stop_on_fetch_error,
        shutdown,
    ));

    let start_time = chrono::prelude::Local::now();
    let summary = scheduler.run_all(walker).await;
    let end_time = chrono::prelude::Local::now();

    summary.log();
    info!(
        "Card scrape started at: {}. Finished at: {}. Took: {} seconds for {} sets, retrieving {} cards",
        start_time,
        end_time,
        (end_time - start_time).num_seconds(),
        scheduler.ranges().len(),
        summary.retrieved_count()
    );

    if summary.is_success() {
        Ok(())
    } else {
        Err(format!("{} failures while caching cards", summary.failure_count()).into())
    }
}
