//! Test utilities and fixtures for confpod tests.
//!
//! This module provides a temporary catalog, episode/person fixtures, and a
//! tiny in-memory audio payload to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_db, insert_episode, mock_episode};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     insert_episode(&pool, &mock_episode(1)).await;
//!     // ... test logic
//! }
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;

use crate::model::Episode;

/// Creates a temporary catalog for testing.
///
/// The database lives at `test.db` in a temporary directory that is removed
/// when the returned `TempDir` is dropped. Keep it alive for the whole test.
/// The catalog tables come from `migrations/`.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to create catalog tables");

    (pool, dir)
}

/// Creates a fully enriched, regular-session episode with the given ID.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let pending = Episode { guid: None, ..mock_episode(3) };
/// ```
pub fn mock_episode(id: i64) -> Episode {
    Episode {
        episode_id: id,
        conference_month: Some("April".to_string()),
        conference_year: Some(2024),
        session: Some("sat_morn".to_string()),
        talk_name: Some(format!("Talk {}", id)),
        talk_url: Some(format!("https://example.org/talks/{}", id)),
        guid: Some(format!("guid-{}", id)),
        pub_date: 1_712_419_200,
        season: 12,
        episode: id,
        speaker: Some(format!("Speaker {}", id)),
        speaker_title: Some("Of the Seventy".to_string()),
        audio_url: format!("https://media.example.org/talks/{}.mp3", id),
        transcript_url: Some(format!("https://media.example.org/talks/{}.vtt", id)),
        length_bytes: Some(9_600_000),
        length_seconds: Some(600.5),
    }
}

/// Creates an episode with no derived fields yet.
pub fn mock_pending_episode(id: i64) -> Episode {
    Episode {
        guid: None,
        length_bytes: None,
        length_seconds: None,
        ..mock_episode(id)
    }
}

/// Inserts an episode row exactly as given.
pub async fn insert_episode(pool: &SqlitePool, episode: &Episode) {
    sqlx::query(
        r#"
        INSERT INTO episodes (
            episode_id, conference_month, conference_year, session,
            talk_name, talk_url, guid, pub_date, season, episode,
            speaker, speaker_title, audio_url, transcript_url,
            length_bytes, length_seconds
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(episode.episode_id)
    .bind(&episode.conference_month)
    .bind(episode.conference_year)
    .bind(&episode.session)
    .bind(&episode.talk_name)
    .bind(&episode.talk_url)
    .bind(&episode.guid)
    .bind(episode.pub_date)
    .bind(episode.season)
    .bind(episode.episode)
    .bind(&episode.speaker)
    .bind(&episode.speaker_title)
    .bind(&episode.audio_url)
    .bind(&episode.transcript_url)
    .bind(episode.length_bytes)
    .bind(episode.length_seconds)
    .execute(pool)
    .await
    .expect("Failed to insert episode");
}

/// Inserts a person row.
pub async fn insert_person(
    pool: &SqlitePool,
    name: &str,
    url: Option<&str>,
    image_url: Option<&str>,
) {
    sqlx::query("INSERT INTO people (name, url, image_url) VALUES (?, ?, ?)")
        .bind(name)
        .bind(url)
        .bind(image_url)
        .execute(pool)
        .await
        .expect("Failed to insert person");
}

/// Minimal 16-bit mono PCM WAV containing `samples` frames of silence.
pub fn silent_wav(sample_rate: u32, samples: u32) -> Vec<u8> {
    let data_len = samples * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}

/// Samples per MPEG-1 Layer III frame
pub const MP3_FRAME_SAMPLES: u32 = 1152;

/// `frames` silent MPEG-1 Layer III frames: 128 kbps, 44.1 kHz, mono, no CRC.
///
/// Each frame is a 4-byte header plus zeroed side info and main data, 417
/// bytes in total (no padding).
pub fn silent_mp3(frames: usize) -> Vec<u8> {
    const HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC0];
    const FRAME_LEN: usize = 417;

    let mut out = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        out.extend_from_slice(&HEADER);
        out.resize(out.len() + FRAME_LEN - HEADER.len(), 0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;
        let episodes = crate::db::get_all_episodes(&pool).await.unwrap();
        assert!(episodes.is_empty());
    }

    #[tokio::test]
    async fn test_insert_episode_roundtrip() {
        let (pool, _dir) = temp_db().await;
        insert_episode(&pool, &mock_pending_episode(5)).await;

        let episodes = crate::db::get_all_episodes(&pool).await.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].talk_name.as_deref(), Some("Talk 5"));
        assert!(!episodes[0].is_enriched());
    }

    #[test]
    fn test_mock_episode_is_enriched() {
        assert!(mock_episode(1).is_enriched());
        assert!(!mock_pending_episode(1).is_enriched());
    }

    #[test]
    fn test_silent_wav_layout() {
        let wav = silent_wav(8000, 100);
        assert_eq!(wav.len(), 44 + 200);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
    }

    #[test]
    fn test_silent_mp3_layout() {
        let mp3 = silent_mp3(3);
        assert_eq!(mp3.len(), 3 * 417);
        assert_eq!(&mp3[417..421], &[0xFF, 0xFB, 0x90, 0xC0]);
    }
}
