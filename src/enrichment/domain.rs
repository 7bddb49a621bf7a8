//! Internal domain models for episode enrichment.
//!
//! These types describe what the enrichment pass derives for an episode and
//! what can go wrong while deriving it.

use std::time::Duration;

/// Fields derived from an episode's audio payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    /// Feed GUID
    pub guid: String,
    /// Payload size in bytes
    pub length_bytes: i64,
    /// Play time in seconds
    pub length_seconds: f64,
}

impl DerivedFields {
    /// Build the fields to persist for one enriched payload.
    ///
    /// The GUID is fill-once: an existing value always wins over the freshly
    /// generated candidate. Length and duration are taken from this pass.
    pub fn merge(
        existing_guid: Option<&str>,
        candidate_guid: String,
        payload_len: usize,
        duration: Duration,
    ) -> Self {
        let guid = match existing_guid {
            Some(existing) => existing.to_string(),
            None => candidate_guid,
        };

        Self {
            guid,
            length_bytes: payload_len as i64,
            length_seconds: duration.as_secs_f64(),
        }
    }
}

/// Counts reported after an enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    /// Episodes fetched, measured and written
    pub enriched: usize,
    /// Payload bytes downloaded
    pub bytes_fetched: u64,
}

/// Errors from the audio fetch boundary
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be built from the fetch settings
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Errors from the audio frame decoder
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("No audio track found in payload")]
    NoAudioTrack,

    #[error("Malformed audio stream: {0}")]
    Malformed(String),
}

/// Errors that abort an enrichment pass
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Episode {episode_id}: {source}")]
    Decode {
        episode_id: i64,
        #[source]
        source: DecodeError,
    },

    #[error("Catalog error during enrichment: {0}")]
    Database(#[from] sqlx::Error),
}
