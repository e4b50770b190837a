use thiserror::Error;

use crate::plays::{EventType, GameRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeasonError {
    #[error("Invalid formatting: season argument must be of format YYYY-YYYY, got \"{0}\"")]
    Format(String),

    #[error("Invalid formatting: season argument must be composed of numerical characters, got \"{0}\"")]
    NotNumeric(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no active goaltender matches \"{0}\"")]
    NotFound(String),

    #[error("goaltender selection failed: {0}")]
    Selection(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("game payload unavailable: {0}")]
    Unavailable(String),
}

/// A shot or goal play that names the goaltender but no shooter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("game {game}, event {event_idx}: {event_type} play has no shooter or scorer")]
    MissingShooter {
        game: GameRef,
        event_idx: u32,
        event_type: EventType,
    },
}

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("fetch failed for game {game}: {source}")]
    Fetch {
        game: GameRef,
        #[source]
        source: FetchError,
    },

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}
