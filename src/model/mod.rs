//! Core data models for the talk catalog.
//!
//! Defines the catalog entities: [`Episode`], [`PendingEpisode`], and
//! [`PersonLink`]. These are derived from SQLx for database mapping.
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `episodes` - One row per conference talk, including derived audio fields
//! - `people` - Speaker profile links keyed by display name

use sqlx::FromRow;

/// A conference talk in the catalog.
///
/// The derived fields (`guid`, `length_bytes`, `length_seconds`) stay NULL
/// until the enrichment pass fills them.
#[derive(Debug, Clone, FromRow)]
pub struct Episode {
    /// Primary key
    pub episode_id: i64,
    /// Conference month, e.g. "April"
    pub conference_month: Option<String>,
    /// Conference year
    pub conference_year: Option<i64>,
    /// Session tag, e.g. "sat_morn" or "sat_morn_complete"
    pub session: Option<String>,
    /// Talk title
    pub talk_name: Option<String>,
    /// Link to the talk page
    pub talk_url: Option<String>,
    /// Stable feed GUID (fill-once)
    pub guid: Option<String>,
    /// Publish time, seconds since the Unix epoch
    pub pub_date: i64,
    /// Season number (one season per conference)
    pub season: i64,
    /// Episode number within the season
    pub episode: i64,
    /// Speaker display name
    pub speaker: Option<String>,
    /// Speaker calling or title
    pub speaker_title: Option<String>,
    /// Remote audio payload
    pub audio_url: String,
    /// Remote WebVTT transcript
    pub transcript_url: Option<String>,
    /// Audio payload size in bytes
    pub length_bytes: Option<i64>,
    /// Audio play time in seconds
    pub length_seconds: Option<f64>,
}

impl Episode {
    /// True once every derived field has been populated.
    pub fn is_enriched(&self) -> bool {
        self.guid.is_some() && self.length_bytes.is_some() && self.length_seconds.is_some()
    }
}

/// An episode selected for enrichment.
#[derive(Debug, Clone, FromRow)]
pub struct PendingEpisode {
    pub episode_id: i64,
    pub audio_url: String,
    /// Existing GUID, if one was already assigned
    pub guid: Option<String>,
}

/// Profile link for a speaker.
///
/// Both fields are empty strings when the person is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct PersonLink {
    pub url: String,
    pub image_url: String,
}
