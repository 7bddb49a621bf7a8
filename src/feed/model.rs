//! In-memory feed document.
//!
//! Plain data mirroring the RSS 2.0 tree with the `itunes` and `podcast`
//! namespace extensions. Built once per run, serialized by
//! [`writer`](super::writer), then dropped.

use chrono::{DateTime, Utc};

/// Enclosure MIME type for episode audio
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// MIME type of linked transcripts
pub const TRANSCRIPT_MIME_TYPE: &str = "text/vtt";

/// Role attached to the speaker's podcast:person entry
pub const AUTHOR_ROLE: &str = "Author";

/// RFC 2822 date layout with a numeric zone, e.g. `Sat, 06 Apr 2024 16:00:00 +0000`
pub const RFC2822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Render a timestamp in the feed's date format.
pub fn rfc2822(time: DateTime<Utc>) -> String {
    time.format(RFC2822_FORMAT).to_string()
}

/// The whole feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    pub channel: Channel,
}

/// Channel-level metadata plus its items
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub generator: String,
    pub docs: String,
    pub pub_date: String,
    pub last_build_date: String,
    pub image_url: String,
    pub author: String,
    pub explicit: bool,
    pub show_type: String,
    pub category: Category,
    pub location: Location,
    /// Items in catalog order (newest first)
    pub items: Vec<FeedItem>,
}

/// itunes:category with at most one nested subcategory
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub text: String,
    pub subcategory: Option<String>,
}

/// podcast:location
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub geo: String,
    pub osm: String,
}

/// One episode entry
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub enclosure: Enclosure,
    pub guid: Guid,
    pub pub_date: String,
    /// itunes:duration, fixed-point seconds
    pub duration: String,
    pub explicit: bool,
    /// itunes:episode (catalog episode ID)
    pub itunes_episode: i64,
    /// itunes:season
    pub itunes_season: i64,
    pub transcript: Option<Transcript>,
    pub persons: Vec<PodcastPerson>,
    pub season: PodcastSeason,
    /// podcast:episode (number within the season)
    pub episode: i64,
}

/// Audio attachment
#[derive(Debug, Clone, PartialEq)]
pub struct Enclosure {
    pub url: String,
    pub length: i64,
    pub mime_type: String,
}

/// Item identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Guid {
    pub value: String,
    pub is_permalink: bool,
}

/// podcast:transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub url: String,
    pub mime_type: String,
}

/// podcast:person. `href` and `img` may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastPerson {
    pub name: String,
    pub role: String,
    pub href: String,
    pub img: String,
}

/// podcast:season
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastSeason {
    pub number: i64,
    pub name: String,
}
