use std::sync::Arc;

use log::error;
use serde_json::Value;

use crate::cards::card_id::CardId;
use crate::cards::runner_card::RunnerCard;
use crate::content_fetcher::ContentFetcher;
use crate::error::CardClientError;
use crate::utilities::constants::CARD_API_PATH;

pub struct NetrunnerDbClient {
    fetcher: Arc<dyn ContentFetcher>,
    base_url: String,
}

impl NetrunnerDbClient {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, base_url: &str) -> Self {
        NetrunnerDbClient {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn card_url(&self, card_id: &CardId) -> String {
        format!("{}{}/{}", self.base_url, CARD_API_PATH, card_id)
    }

    pub async fn fetch_card(&self, card_id: &CardId) -> Result<RunnerCard, CardClientError> {
        let url = self.card_url(card_id);
        let content = self.fetcher.fetch(&url).await.map_err(|source| {
            error!("Problem with URL: {}", url);
            CardClientError::FetchFailed {
                card_id: *card_id,
                source,
            }
        })?;

        Self::parse_card(card_id, &content).inspect_err(|e| {
            if let CardClientError::MalformedResponse { reason, payload, .. } = e {
                error!(
                    "An error occurred while decoding card {}: {}\n{}",
                    card_id, reason, payload
                );
            }
        })
    }

    /// The API answers with the card wrapped in a one element array.
    fn parse_card(card_id: &CardId, content: &[u8]) -> Result<RunnerCard, CardClientError> {
        let malformed = |reason: String| CardClientError::MalformedResponse {
            card_id: *card_id,
            reason,
            payload: String::from_utf8_lossy(content).into_owned(),
        };

        let wrapper: Value =
            serde_json::from_slice(content).map_err(|e| malformed(e.to_string()))?;
        let card = match wrapper {
            Value::Array(mut items) if items.len() == 1 => items.remove(0),
            Value::Array(items) => {
                return Err(malformed(format!(
                    "expected one card in the response, found {}",
                    items.len()
                )))
            }
            _ => return Err(malformed("response is not a JSON array".to_string())),
        };

        let card: RunnerCard =
            serde_json::from_value(card).map_err(|e| malformed(e.to_string()))?;
        // The cache files the record under its own code.
        if card.code != card_id.to_string() {
            return Err(malformed(format!(
                "requested card {} but the response is for '{}'",
                card_id, card.code
            )));
        }
        Ok(card)
    }
}
