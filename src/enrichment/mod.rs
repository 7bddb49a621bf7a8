//! Episode enrichment - derives GUID, byte length and duration from audio.
//!
//! # Architecture
//!
//! - **Domain** (`domain.rs`) - Derived fields, the fill-once GUID rule, errors
//! - **Duration** (`duration.rs`) - Frame-by-frame play time via symphonia
//! - **Fetch** (`fetch.rs`) - HTTP retrieval of audio payloads
//! - **Traits** (`traits.rs`) - Fetch/decode seams plus test mocks
//! - **Service** - Transactional orchestration over the catalog
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{EnrichmentService, HttpFetcher, SymphoniaEstimator};
//!
//! let fetcher = HttpFetcher::new(&config.fetch)?;
//! let service = EnrichmentService::new(fetcher, SymphoniaEstimator);
//! let summary = service.enrich_pending(&pool).await?;
//! println!("Enriched {} episodes", summary.enriched);
//! ```

pub mod domain;
pub mod duration;
pub mod fetch;
pub mod service;
pub mod traits;

pub use domain::{DecodeError, DerivedFields, EnrichmentError, EnrichmentSummary, FetchError};
pub use duration::SymphoniaEstimator;
pub use fetch::HttpFetcher;
pub use service::EnrichmentService;
pub use traits::{AudioFetcher, DurationEstimator};
