//! Read-only catalog inspection.

use tokio::runtime::Runtime;

use super::publish::open_catalog;
use crate::config::Config;
use crate::db;

/// List episodes awaiting enrichment
pub fn cmd_pending(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    rt.block_on(pending(config))
}

async fn pending(config: &Config) -> anyhow::Result<()> {
    let pool = open_catalog(config).await?;
    let pending = db::get_pending_episodes(&pool).await?;

    if pending.is_empty() {
        println!("No episodes need enrichment.");
        return Ok(());
    }

    for episode in &pending {
        let guid = episode.guid.as_deref().unwrap_or("-");
        println!("{:>6}  {}  {}", episode.episode_id, guid, episode.audio_url);
    }
    println!("\n{} episodes pending.", pending.len());
    Ok(())
}
