//! End-to-end run: enrich the catalog, then publish the feed.
//!
//! Stages run strictly in order and the first error ends the run. Enrichment
//! commits before the feed is assembled; the output file is only replaced
//! once the whole document has been serialized.

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::info;

use crate::enrichment::{AudioFetcher, DurationEstimator, EnrichmentService, EnrichmentSummary};
use crate::error::{Result, ResultExt};
use crate::feed::{FeedAssembler, write_feed};

/// Outcome of a publish step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub items: usize,
    pub bytes_written: usize,
}

/// Outcome of a full run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub enrichment: EnrichmentSummary,
    pub publish: PublishSummary,
}

/// Enrich pending episodes, then rebuild the feed at `output`.
pub async fn run<F, E>(
    pool: &SqlitePool,
    enricher: &EnrichmentService<F, E>,
    assembler: &FeedAssembler,
    output: &Path,
    now: DateTime<Utc>,
) -> Result<RunSummary>
where
    F: AudioFetcher,
    E: DurationEstimator,
{
    let enrichment = enricher
        .enrich_pending(pool)
        .await
        .with_context("enrichment pass failed")?;

    let publish = publish(pool, assembler, output, now).await?;

    Ok(RunSummary {
        enrichment,
        publish,
    })
}

/// Rebuild the feed from the catalog as it stands. No network access.
pub async fn publish(
    pool: &SqlitePool,
    assembler: &FeedAssembler,
    output: &Path,
    now: DateTime<Utc>,
) -> Result<PublishSummary> {
    let doc = assembler
        .assemble(pool, now)
        .await
        .with_context("feed assembly failed")?;
    let items = doc.channel.items.len();

    let bytes_written =
        write_feed(&doc, output).with_context(format!("writing {}", output.display()))?;

    info!(target: "confpod::pipeline", items, bytes = bytes_written, "Feed published");
    Ok(PublishSummary {
        items,
        bytes_written,
    })
}
