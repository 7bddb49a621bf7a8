//! Episode to feed item mapping.
//!
//! Field rules:
//! - Title is "<talk> by <speaker>"; description adds the speaker's title
//!   and a link line.
//! - Sessions whose tag ends in "complete" are full-session recordings:
//!   title and description become "<talk> (complete)" with no speaker.
//! - Missing text columns render as empty strings.

use chrono::DateTime;

use super::FeedError;
use super::model::{
    AUDIO_MIME_TYPE, AUTHOR_ROLE, Enclosure, FeedItem, Guid, PodcastPerson, PodcastSeason,
    TRANSCRIPT_MIME_TYPE, Transcript, rfc2822,
};
use crate::model::{Episode, PersonLink};

/// Suffix marking a full-session recording
const COMPLETE_SESSION_SUFFIX: &str = "complete";

/// Map one enriched episode to its feed item.
///
/// # Errors
///
/// - [`FeedError::Unenriched`] if the GUID, length or duration is missing
/// - [`FeedError::InvalidTimestamp`] if `pub_date` is out of range
pub fn map_episode(episode: &Episode, person: &PersonLink) -> Result<FeedItem, FeedError> {
    let (Some(guid), Some(length_bytes), Some(length_seconds)) = (
        episode.guid.as_ref(),
        episode.length_bytes,
        episode.length_seconds,
    ) else {
        return Err(FeedError::Unenriched(episode.episode_id));
    };

    let published = DateTime::from_timestamp(episode.pub_date, 0).ok_or(
        FeedError::InvalidTimestamp {
            episode_id: episode.episode_id,
            pub_date: episode.pub_date,
        },
    )?;

    let talk = text(&episode.talk_name);
    let speaker = text(&episode.speaker);
    let talk_url = text(&episode.talk_url);

    let (title, description) = titles(
        talk,
        speaker,
        text(&episode.speaker_title),
        talk_url,
        text(&episode.session),
    );

    Ok(FeedItem {
        title,
        link: talk_url.to_string(),
        description,
        enclosure: Enclosure {
            url: episode.audio_url.clone(),
            length: length_bytes,
            mime_type: AUDIO_MIME_TYPE.to_string(),
        },
        guid: Guid {
            value: guid.clone(),
            is_permalink: false,
        },
        pub_date: rfc2822(published),
        duration: format!("{:.6}", length_seconds),
        explicit: false,
        itunes_episode: episode.episode_id,
        itunes_season: episode.season,
        transcript: episode.transcript_url.as_ref().map(|url| Transcript {
            url: url.clone(),
            mime_type: TRANSCRIPT_MIME_TYPE.to_string(),
        }),
        persons: vec![PodcastPerson {
            name: speaker.to_string(),
            role: AUTHOR_ROLE.to_string(),
            href: person.url.clone(),
            img: person.image_url.clone(),
        }],
        season: PodcastSeason {
            number: episode.season,
            name: season_label(episode),
        },
        episode: episode.episode,
    })
}

/// Title and description for a talk.
fn titles(
    talk: &str,
    speaker: &str,
    speaker_title: &str,
    talk_url: &str,
    session: &str,
) -> (String, String) {
    if session.ends_with(COMPLETE_SESSION_SUFFIX) {
        let title = format!("{} (complete)", talk);
        let description = format!("{}\nLink: {}", title, talk_url);
        return (title, description);
    }

    (
        format!("{} by {}", talk, speaker),
        format!(
            "{} by {}, {}\nLink: {}",
            talk, speaker, speaker_title, talk_url
        ),
    )
}

/// "<month> <year> Conference (<season>)"
fn season_label(episode: &Episode) -> String {
    let year = episode
        .conference_year
        .map(|y| y.to_string())
        .unwrap_or_default();
    format!(
        "{} {} Conference ({})",
        text(&episode.conference_month),
        year,
        episode.season
    )
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_episode;

    #[test]
    fn test_regular_session_title() {
        let episode = Episode {
            talk_name: Some("Hope in Christ".to_string()),
            speaker: Some("Jane Speaker".to_string()),
            speaker_title: Some("Relief Society General President".to_string()),
            talk_url: Some("https://example.org/hope".to_string()),
            ..mock_episode(1)
        };

        let item = map_episode(&episode, &PersonLink::default()).unwrap();
        assert_eq!(item.title, "Hope in Christ by Jane Speaker");
        assert_eq!(
            item.description,
            "Hope in Christ by Jane Speaker, Relief Society General President\nLink: https://example.org/hope"
        );
        assert_eq!(item.link, "https://example.org/hope");
    }

    #[test]
    fn test_complete_session_overrides_title() {
        let episode = Episode {
            session: Some("sat_morn_complete".to_string()),
            talk_name: Some("Saturday Morning Session".to_string()),
            talk_url: Some("https://example.org/sat".to_string()),
            ..mock_episode(2)
        };

        let item = map_episode(&episode, &PersonLink::default()).unwrap();
        assert_eq!(item.title, "Saturday Morning Session (complete)");
        assert!(!item.title.contains(" by "));
        assert_eq!(
            item.description,
            "Saturday Morning Session (complete)\nLink: https://example.org/sat"
        );
    }

    #[test]
    fn test_enclosure_guid_and_duration() {
        let item = map_episode(&mock_episode(3), &PersonLink::default()).unwrap();

        assert_eq!(item.enclosure.url, "https://media.example.org/talks/3.mp3");
        assert_eq!(item.enclosure.length, 9_600_000);
        assert_eq!(item.enclosure.mime_type, "audio/mpeg");
        assert_eq!(item.guid.value, "guid-3");
        assert!(!item.guid.is_permalink);
        assert_eq!(item.duration, "600.500000");
        assert_eq!(item.pub_date, "Sat, 06 Apr 2024 16:00:00 +0000");
    }

    #[test]
    fn test_season_and_episode_numbers() {
        let episode = Episode {
            conference_month: Some("October".to_string()),
            conference_year: Some(2023),
            season: 11,
            episode: 4,
            ..mock_episode(57)
        };

        let item = map_episode(&episode, &PersonLink::default()).unwrap();
        assert_eq!(item.season.number, 11);
        assert_eq!(item.season.name, "October 2023 Conference (11)");
        assert_eq!(item.itunes_season, 11);
        assert_eq!(item.itunes_episode, 57);
        assert_eq!(item.episode, 4);
    }

    #[test]
    fn test_person_attribution() {
        let link = PersonLink {
            url: "https://example.org/speaker-4".to_string(),
            image_url: "https://example.org/speaker-4.jpg".to_string(),
        };
        let item = map_episode(&mock_episode(4), &link).unwrap();

        assert_eq!(item.persons.len(), 1);
        assert_eq!(item.persons[0].name, "Speaker 4");
        assert_eq!(item.persons[0].role, "Author");
        assert_eq!(item.persons[0].href, "https://example.org/speaker-4");
        assert_eq!(item.persons[0].img, "https://example.org/speaker-4.jpg");
    }

    #[test]
    fn test_person_miss_yields_empty_attribution() {
        let item = map_episode(&mock_episode(5), &PersonLink::default()).unwrap();
        assert_eq!(item.persons.len(), 1);
        assert_eq!(item.persons[0].href, "");
        assert_eq!(item.persons[0].img, "");
    }

    #[test]
    fn test_transcript_only_when_present() {
        let with = map_episode(&mock_episode(6), &PersonLink::default()).unwrap();
        let transcript = with.transcript.expect("transcript attached");
        assert_eq!(transcript.url, "https://media.example.org/talks/6.vtt");
        assert_eq!(transcript.mime_type, "text/vtt");

        let episode = Episode {
            transcript_url: None,
            ..mock_episode(6)
        };
        let without = map_episode(&episode, &PersonLink::default()).unwrap();
        assert!(without.transcript.is_none());
    }

    #[test]
    fn test_missing_text_fields_render_empty() {
        let episode = Episode {
            talk_name: None,
            speaker: None,
            speaker_title: None,
            talk_url: None,
            session: None,
            conference_month: None,
            conference_year: None,
            ..mock_episode(8)
        };

        let item = map_episode(&episode, &PersonLink::default()).unwrap();
        assert_eq!(item.title, " by ");
        assert_eq!(item.link, "");
        assert_eq!(item.season.name, "  Conference (12)");
    }

    #[test]
    fn test_unenriched_episode_is_rejected() {
        let episode = Episode {
            length_seconds: None,
            ..mock_episode(9)
        };
        let result = map_episode(&episode, &PersonLink::default());
        assert!(matches!(result, Err(FeedError::Unenriched(9))));
    }
}
