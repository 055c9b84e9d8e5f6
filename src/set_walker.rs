use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};

use crate::card_cache::{CardCache, ImageOutcome};
use crate::cards::card_id::CardId;
use crate::cards::set_range::SetRange;
use crate::catalog::set_name_for;
use crate::error::{CacheError, CardClientError, WalkError};
use crate::netrunnerdb_client::NetrunnerDbClient;

#[derive(Debug)]
pub enum CardFailure {
    Fetch(CardClientError),
    Persist { card_id: CardId, source: CacheError },
}

impl fmt::Display for CardFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFailure::Fetch(e) => write!(f, "{}", e),
            CardFailure::Persist { card_id, source } => {
                write!(f, "caching card {} failed: {}", card_id, source)
            }
        }
    }
}

/// What happened while walking one range.
#[derive(Debug, Default)]
pub struct WalkReport {
    pub range: String,
    pub retrieved: Vec<CardId>,
    pub already_cached: usize,
    pub images_repaired: usize,
    /// The not-found answer that marked the end of the set. Any other error
    /// that stops a range is recorded in `failures`.
    pub ended_by: Option<CardClientError>,
    pub failures: Vec<CardFailure>,
    pub cancelled: bool,
}

impl WalkReport {
    fn new(range: &SetRange) -> Self {
        WalkReport {
            range: range.to_string(),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Step {
    Continue,
    EndRange,
}

pub struct SetWalker {
    client: NetrunnerDbClient,
    cache: CardCache,
    stop_on_fetch_error: bool,
    shutdown: Arc<AtomicBool>,
}

impl SetWalker {
    pub fn new(
        client: NetrunnerDbClient,
        cache: CardCache,
        stop_on_fetch_error: bool,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        SetWalker {
            client,
            cache,
            stop_on_fetch_error,
            shutdown,
        }
    }

    /// Walks `range` in ascending order, one card at a time, fetching and
    /// caching every card that is not cached yet.
    pub async fn walk_range(&self, range: &SetRange) -> Result<WalkReport, WalkError> {
        for bound in [&range.start, &range.end] {
            set_name_for(bound).map_err(|source| WalkError::Catalog {
                range: range.to_string(),
                source,
            })?;
        }

        let mut report = WalkReport::new(range);
        let mut current = range.start;
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                warn!("Stopping {} before card {}, shutdown requested", range, current);
                report.cancelled = true;
                break;
            }

            if let Step::EndRange = self.walk_card(range, &current, &mut report).await? {
                break;
            }

            if current >= range.end {
                break;
            }
            current = current.next().map_err(|source| WalkError::CardId {
                range: range.to_string(),
                source,
            })?;
        }

        info!(
            "Finished {}: {} retrieved, {} already cached, {} images repaired, {} failures",
            report.range,
            report.retrieved.len(),
            report.already_cached,
            report.images_repaired,
            report.failures.len()
        );
        Ok(report)
    }

    async fn walk_card(
        &self,
        range: &SetRange,
        card_id: &CardId,
        report: &mut WalkReport,
    ) -> Result<Step, WalkError> {
        let set_name = set_name_for(card_id).map_err(|source| WalkError::Catalog {
            range: range.to_string(),
            source,
        })?;
        let cache_error = |source: CacheError| WalkError::Cache {
            card_id: *card_id,
            source,
        };

        if self.cache.exists(set_name, card_id).map_err(cache_error)? {
            if self.cache.image_exists(set_name, card_id).map_err(cache_error)?
                || self.repair_image(set_name, card_id, report).await
            {
                info!("Card {} has already been retrieved", card_id);
                report.already_cached += 1;
                return Ok(Step::Continue);
            }
            warn!("Cached record for {} is unreadable, fetching it again", card_id);
        }

        Ok(self.retrieve(range, card_id, report).await)
    }

    async fn retrieve(&self, range: &SetRange, card_id: &CardId, report: &mut WalkReport) -> Step {
        let card = match self.client.fetch_card(card_id).await {
            Ok(card) => card,
            Err(e) if self.stop_on_fetch_error && e.is_not_found() => {
                info!("Card {} does not exist, {} ends here", card_id, range);
                report.ended_by = Some(e);
                return Step::EndRange;
            }
            Err(e) if self.stop_on_fetch_error => {
                error!("{}. Ending {} at card {}", e, range, card_id);
                report.failures.push(CardFailure::Fetch(e));
                return Step::EndRange;
            }
            Err(e) => {
                error!("{}. Skipping card {}", e, card_id);
                report.failures.push(CardFailure::Fetch(e));
                return Step::Continue;
            }
        };
        info!("{} successfully retrieved...", card.title);

        match self.cache.persist(&card).await {
            Ok(_) => report.retrieved.push(*card_id),
            Err(source) => {
                error!("Could not cache card {}: {}", card_id, source);
                report.failures.push(CardFailure::Persist {
                    card_id: *card_id,
                    source,
                });
            }
        }
        Step::Continue
    }

    /// Returns false when the cached record itself cannot be read, in which
    /// case the card has to be fetched again.
    async fn repair_image(
        &self,
        set_name: &str,
        card_id: &CardId,
        report: &mut WalkReport,
    ) -> bool {
        match self.cache.repair_image(set_name, card_id).await {
            Ok(ImageOutcome::Downloaded) => {
                info!("Repaired missing image for card {}", card_id);
                report.images_repaired += 1;
            }
            Ok(_) => {}
            Err(CacheError::Serialize { .. }) => return false,
            Err(source) => {
                error!("Could not repair image for card {}: {}", card_id, source);
                report.failures.push(CardFailure::Persist {
                    card_id: *card_id,
                    source,
                });
            }
        }
        true
    }
}
