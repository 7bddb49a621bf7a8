//! Enrichment service - derives and stores audio metadata for episodes
//!
//! For every episode missing a GUID, byte length or duration:
//! 1. Fetch the audio payload
//! 2. Measure its play time
//! 3. Generate a candidate GUID (kept only if the episode has none)
//! 4. Write length, duration and GUID back
//!
//! The whole pass runs in one catalog transaction. The first failure drops
//! the transaction, so no episode from a failed pass is committed.

use sqlx::sqlite::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::enrichment::{
    domain::{DerivedFields, EnrichmentError, EnrichmentSummary},
    duration::extension_hint,
    traits::{AudioFetcher, DurationEstimator},
};
use crate::model::PendingEpisode;

/// Service for enriching catalog episodes
pub struct EnrichmentService<F, E> {
    fetcher: F,
    estimator: E,
}

impl<F: AudioFetcher, E: DurationEstimator> EnrichmentService<F, E> {
    /// Create a new enrichment service from its fetch and decode boundaries
    pub fn new(fetcher: F, estimator: E) -> Self {
        Self { fetcher, estimator }
    }

    /// Enrich every incomplete episode and commit the results together.
    pub async fn enrich_pending(
        &self,
        pool: &SqlitePool,
    ) -> Result<EnrichmentSummary, EnrichmentError> {
        let mut tx = pool.begin().await?;
        let pending = db::get_pending_episodes(&mut *tx).await?;

        if pending.is_empty() {
            info!(target: "confpod::enrichment", "No episodes need enrichment");
            return Ok(EnrichmentSummary::default());
        }

        info!(target: "confpod::enrichment", count = pending.len(), "Enriching episodes");

        let mut summary = EnrichmentSummary::default();
        for episode in &pending {
            let fields = self.derive(episode).await?;
            db::save_derived_fields(&mut *tx, episode.episode_id, &fields).await?;

            summary.enriched += 1;
            summary.bytes_fetched += fields.length_bytes as u64;
        }

        tx.commit().await?;

        info!(
            target: "confpod::enrichment",
            enriched = summary.enriched,
            bytes = summary.bytes_fetched,
            "Enrichment committed"
        );
        Ok(summary)
    }

    /// Fetch and measure one episode's payload.
    async fn derive(&self, episode: &PendingEpisode) -> Result<DerivedFields, EnrichmentError> {
        info!(
            target: "confpod::enrichment",
            episode_id = episode.episode_id,
            url = %episode.audio_url,
            "Fetching audio"
        );

        let payload = self.fetcher.fetch(&episode.audio_url).await?;
        let payload_len = payload.len();

        let hint = extension_hint(&episode.audio_url);
        let duration = self
            .estimator
            .estimate(payload, hint.as_deref())
            .map_err(|source| EnrichmentError::Decode {
                episode_id: episode.episode_id,
                source,
            })?;

        let fields = DerivedFields::merge(
            episode.guid.as_deref(),
            Uuid::new_v4().to_string(),
            payload_len,
            duration,
        );

        info!(
            target: "confpod::enrichment",
            episode_id = episode.episode_id,
            bytes = fields.length_bytes,
            seconds = fields.length_seconds,
            "Measured audio"
        );
        Ok(fields)
    }
}
