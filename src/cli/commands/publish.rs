//! Enrichment and feed publishing commands.

use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::enrichment::{EnrichmentService, HttpFetcher, SymphoniaEstimator};
use crate::feed::FeedAssembler;
use crate::{db, pipeline};

/// Enrich pending episodes, then rebuild the feed
pub fn cmd_run(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(run(config))
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let pool = open_catalog(config).await?;
    let service = enrichment_service(config)?;
    let assembler = FeedAssembler::new(config.feed.channel.clone());

    let summary = pipeline::run(
        &pool,
        &service,
        &assembler,
        &config.feed.output_path,
        Utc::now(),
    )
    .await?;

    println!(
        "Enriched {} episodes ({} bytes fetched).",
        summary.enrichment.enriched, summary.enrichment.bytes_fetched
    );
    println!(
        "Wrote {} items to {}.",
        summary.publish.items,
        config.feed.output_path.display()
    );
    Ok(())
}

/// Enrich pending episodes only
pub fn cmd_enrich(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(enrich(config))
}

async fn enrich(config: &Config) -> anyhow::Result<()> {
    let pool = open_catalog(config).await?;
    let service = enrichment_service(config)?;

    let summary = service.enrich_pending(&pool).await?;
    println!(
        "Enriched {} episodes ({} bytes fetched).",
        summary.enriched, summary.bytes_fetched
    );
    Ok(())
}

/// Rebuild the feed without fetching anything
pub fn cmd_build(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(build(config))
}

async fn build(config: &Config) -> anyhow::Result<()> {
    let pool = open_catalog(config).await?;
    let assembler = FeedAssembler::new(config.feed.channel.clone());

    let summary =
        pipeline::publish(&pool, &assembler, &config.feed.output_path, Utc::now()).await?;
    println!(
        "Wrote {} items ({} bytes) to {}.",
        summary.items,
        summary.bytes_written,
        config.feed.output_path.display()
    );
    Ok(())
}

pub(super) async fn open_catalog(config: &Config) -> anyhow::Result<SqlitePool> {
    db::open_catalog(&config.catalog.db_path)
        .await
        .with_context(|| format!("opening catalog {}", config.catalog.db_path.display()))
}

fn enrichment_service(
    config: &Config,
) -> anyhow::Result<EnrichmentService<HttpFetcher, SymphoniaEstimator>> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    Ok(EnrichmentService::new(fetcher, SymphoniaEstimator))
}
