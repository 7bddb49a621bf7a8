//! Feed document assembly.
//!
//! Channel metadata comes from [`ChannelConfig`]; items come from the
//! catalog in its query order. Items are never reordered or filtered here.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use tracing::{debug, info};

use super::FeedError;
use super::mapper::map_episode;
use super::model::{Category, Channel, FeedDocument, FeedItem, Location, rfc2822};
use crate::config::ChannelConfig;
use crate::db;

/// Builds feed documents for one channel
pub struct FeedAssembler {
    channel: ChannelConfig,
}

impl FeedAssembler {
    /// Create an assembler for the given channel metadata
    pub fn new(channel: ChannelConfig) -> Self {
        Self { channel }
    }

    /// Wrap `items` in the channel.
    ///
    /// `now` becomes both the publish date and the last build date.
    pub fn build(&self, items: Vec<FeedItem>, now: DateTime<Utc>) -> FeedDocument {
        let c = &self.channel;
        let stamp = rfc2822(now);

        FeedDocument {
            channel: Channel {
                title: c.title.clone(),
                link: c.link.clone(),
                description: c.description.clone(),
                language: c.language.clone(),
                generator: c.generator.clone(),
                docs: c.docs.clone(),
                pub_date: stamp.clone(),
                last_build_date: stamp,
                image_url: c.image_url.clone(),
                author: c.author.clone(),
                explicit: c.explicit,
                show_type: c.show_type.clone(),
                category: Category {
                    text: c.category.clone(),
                    subcategory: Some(c.subcategory.clone()).filter(|s| !s.is_empty()),
                },
                location: Location {
                    name: c.location.name.clone(),
                    geo: c.location.geo.clone(),
                    osm: c.location.osm.clone(),
                },
                items,
            },
        }
    }

    /// Read the catalog, resolve speakers, and build the document.
    pub async fn assemble(
        &self,
        pool: &SqlitePool,
        now: DateTime<Utc>,
    ) -> Result<FeedDocument, FeedError> {
        let episodes = db::get_all_episodes(pool).await?;

        let mut items = Vec::with_capacity(episodes.len());
        for episode in &episodes {
            let speaker = episode.speaker.as_deref().unwrap_or("");
            let person = db::get_person_link(pool, speaker).await;
            debug!(
                target: "confpod::feed",
                episode_id = episode.episode_id,
                speaker,
                linked = !person.url.is_empty(),
                "Mapping episode"
            );
            items.push(map_episode(episode, &person)?);
        }

        info!(target: "confpod::feed", items = items.len(), "Feed assembled");
        Ok(self.build(items, now))
    }
}
