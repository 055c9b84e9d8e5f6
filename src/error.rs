use std::path::PathBuf;

use thiserror::Error;

use crate::cards::card_id::CardId;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built or sent, or the body could not be read.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GET {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum CardClientError {
    #[error("fetching card {card_id} failed: {source}")]
    FetchFailed {
        card_id: CardId,
        #[source]
        source: FetchError,
    },
    /// Payload is kept so the caller can print what the API actually sent.
    #[error("malformed response for card {card_id}: {reason}")]
    MalformedResponse {
        card_id: CardId,
        reason: String,
        payload: String,
    },
}

impl CardClientError {
    pub fn card_id(&self) -> CardId {
        match self {
            CardClientError::FetchFailed { card_id, .. }
            | CardClientError::MalformedResponse { card_id, .. } => *card_id,
        }
    }

    /// The API answers 404 for identifiers past the last card of a set.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CardClientError::FetchFailed {
                source: FetchError::HttpStatus { status: 404, .. },
                ..
            }
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown set code: {0:02}")]
    UnknownSetCode(u32),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardIdError {
    #[error("card identifier '{0}' is not a five digit number")]
    NotNumeric(String),
    #[error("card identifier {0} does not fit in five digits")]
    OutOfRange(u32),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not (de)serialize card at {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    CardId(#[from] CardIdError),
    #[error("downloading image for card {card_id} failed: {source}")]
    ImageDownload {
        card_id: CardId,
        #[source]
        source: FetchError,
    },
}

impl CacheError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Failures that stop a whole range.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("range {range} cannot be walked: {source}")]
    Catalog {
        range: String,
        #[source]
        source: CatalogError,
    },
    #[error("range {range} has an invalid bound: {source}")]
    CardId {
        range: String,
        #[source]
        source: CardIdError,
    },
    #[error("checking the cache for {card_id} failed: {source}")]
    Cache {
        card_id: CardId,
        #[source]
        source: CacheError,
    },
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("set ranges {first} and {second} overlap")]
    OverlappingRanges { first: String, second: String },
    #[error("no set range named '{0}'")]
    UnknownSet(String),
    #[error("walker task for range {range} panicked: {message}")]
    TaskPanicked { range: String, message: String },
    #[error(transparent)]
    Walk(#[from] WalkError),
}
