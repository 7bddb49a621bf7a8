//! Database module for the talk catalog.
//!
//! Uses SQLx with SQLite. Provides async operations for:
//! - Selecting episodes that still need enrichment
//! - Writing derived audio fields back (GUID is fill-once)
//! - Reading the full catalog in feed order
//! - Resolving speaker profile links
//!
//! The catalog is opened, never created: the schema belongs to the tool
//! that scrapes talks into it. Only the enrichment pass writes.
//!
//! # Example
//!
//! ```ignore
//! use confpod::db::{open_catalog, get_all_episodes};
//!
//! let pool = open_catalog(Path::new("podcast.db")).await?;
//! let episodes = get_all_episodes(&pool).await?;
//! ```

use std::path::Path;

use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Executor;
use tracing::debug;

use crate::enrichment::DerivedFields;
use crate::model::{Episode, PendingEpisode, PersonLink};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "podcast.db";

/// Open an existing catalog.
///
/// The file is not created and no schema is applied. A missing file is an
/// error here; a file without the catalog tables fails on first query.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be opened.
pub async fn open_catalog(path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Select episodes missing any derived field, in store order.
///
/// Accepts a pool or a transaction so the enrichment pass can select and
/// write inside the same transaction.
pub async fn get_pending_episodes<'e, E>(executor: E) -> sqlx::Result<Vec<PendingEpisode>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, PendingEpisode>(
        r#"
        SELECT episode_id, audio_url, guid
        FROM episodes
        WHERE guid IS NULL OR length_bytes IS NULL OR length_seconds IS NULL
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Persist derived fields for one episode.
///
/// Length and duration are overwritten. The GUID is only written when the
/// row has none, so an assigned GUID survives any number of passes.
pub async fn save_derived_fields<'e, E>(
    executor: E,
    episode_id: i64,
    fields: &DerivedFields,
) -> sqlx::Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE episodes
        SET guid = COALESCE(guid, ?),
            length_bytes = ?,
            length_seconds = ?
        WHERE episode_id = ?
        "#,
    )
    .bind(&fields.guid)
    .bind(fields.length_bytes)
    .bind(fields.length_seconds)
    .bind(episode_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Get every episode, newest (highest ID) first.
pub async fn get_all_episodes(pool: &SqlitePool) -> sqlx::Result<Vec<Episode>> {
    sqlx::query_as::<_, Episode>(
        r#"
        SELECT
            episode_id, conference_month, conference_year, session,
            talk_name, talk_url, guid, pub_date, season, episode,
            speaker, speaker_title, audio_url, transcript_url,
            length_bytes, length_seconds
        FROM episodes
        ORDER BY episode_id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Look up a speaker's profile link.
///
/// Never fails: a missing row, a query error, or a NULL in either column
/// yields a link with both fields empty. A half-filled link is never returned.
pub async fn get_person_link(pool: &SqlitePool, name: &str) -> PersonLink {
    let row: sqlx::Result<Option<(Option<String>, Option<String>)>> =
        sqlx::query_as("SELECT url, image_url FROM people WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await;

    match row {
        Ok(Some((Some(url), Some(image_url)))) => PersonLink { url, image_url },
        Ok(Some(_)) => {
            debug!(target: "confpod::db::people", name, "Person row has NULL link columns");
            PersonLink::default()
        }
        Ok(None) => {
            debug!(target: "confpod::db::people", name, "No person row");
            PersonLink::default()
        }
        Err(e) => {
            debug!(target: "confpod::db::people", name, error = %e, "Person lookup failed");
            PersonLink::default()
        }
    }
}
